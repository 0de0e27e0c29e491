//! Poly-curve path data: freehand smoothing, parsing, splitting and re-emission.
//!
//! Path data uses the SVG command subset `M`, `L`, `Q` and `T` (absolute and
//! relative). Parsed [`Segment`]s always carry absolute coordinates, with the
//! reflected control point of `T` segments reconstructed.

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while parsing a single path command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("unknown path command '{0}'")]
    UnknownCommand(char),
    #[error("command '{command}' expects coordinates in groups of {expected}, found {found}")]
    MissingCoordinates {
        command: char,
        expected: usize,
        found: usize,
    },
    #[error("invalid number '{0}' in path data")]
    InvalidNumber(String),
}

/// Serialized path data, e.g. `M 0 0 Q 10 10 20 5 T 40 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathSpec(String);

impl PathSpec {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathSpec {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}

/// Kind of a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Move,
    Line,
    Quad,
    /// Quadratic whose control point reflects the previous one (`T`).
    SmoothQuad,
}

/// One absolute-coordinate path segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub end: Point,
    /// Control point for `Quad` and `SmoothQuad`.
    pub control: Option<Point>,
}

impl Segment {
    pub fn move_to(end: Point) -> Self {
        Self { kind: SegmentKind::Move, end, control: None }
    }

    pub fn line_to(end: Point) -> Self {
        Self { kind: SegmentKind::Line, end, control: None }
    }

    pub fn quad_to(control: Point, end: Point) -> Self {
        Self { kind: SegmentKind::Quad, end, control: Some(control) }
    }

    fn is_quadratic(&self) -> bool {
        matches!(self.kind, SegmentKind::Quad | SegmentKind::SmoothQuad)
    }
}

fn fmt_point(out: &mut String, p: Point) {
    use std::fmt::Write;
    let _ = write!(out, " {} {}", p.x, p.y);
}

/// Midpoint-smoothed quadratic path through a freehand trace.
///
/// Each interior point becomes the control point of a quadratic ending at the
/// midpoint to the next point. The first curve is an explicit `Q`, the rest
/// chain with `T`, and the trace ends with a `T` to the last point.
pub fn build_smooth_path(points: &[Point]) -> PathSpec {
    let Some(first) = points.first() else {
        return PathSpec::default();
    };

    let mut out = String::from("M");
    fmt_point(&mut out, *first);

    match points.len() {
        1 => {}
        2 => {
            out.push_str(" L");
            fmt_point(&mut out, points[1]);
        }
        n => {
            for i in 1..n - 1 {
                let mid = points[i].midpoint(points[i + 1]);
                if i == 1 {
                    out.push_str(" Q");
                    fmt_point(&mut out, points[i]);
                } else {
                    out.push_str(" T");
                }
                fmt_point(&mut out, mid);
            }
            out.push_str(" T");
            fmt_point(&mut out, points[n - 1]);
        }
    }

    PathSpec(out)
}

fn flush_number<'a>(
    data: &'a str,
    commands: &mut Vec<(char, Vec<&'a str>)>,
    start: &mut Option<usize>,
    end: usize,
) {
    let Some(s) = start.take() else {
        return;
    };
    match commands.last_mut() {
        Some((_, args)) => args.push(&data[s..end]),
        // Numbers before any command are kept so they get reported.
        None => commands.push(('\0', vec![&data[s..end]])),
    }
}

/// Split path data into `(command, arguments)` pairs.
fn tokenize(data: &str) -> Vec<(char, Vec<&str>)> {
    let mut commands: Vec<(char, Vec<&str>)> = Vec::new();
    let mut number_start: Option<usize> = None;

    for (i, c) in data.char_indices() {
        let is_command = c.is_ascii_alphabetic() && c != 'e' && c != 'E';
        if is_command {
            flush_number(data, &mut commands, &mut number_start, i);
            commands.push((c, Vec::new()));
        } else if c.is_whitespace() || c == ',' {
            flush_number(data, &mut commands, &mut number_start, i);
        } else if c == '-' {
            // A minus starts a new number unless it follows an exponent marker.
            let after_exponent = number_start.is_some()
                && matches!(data[..i].chars().last(), Some('e' | 'E'));
            if !after_exponent {
                flush_number(data, &mut commands, &mut number_start, i);
                number_start = Some(i);
            }
        } else if number_start.is_none() {
            number_start = Some(i);
        }
    }
    flush_number(data, &mut commands, &mut number_start, data.len());
    commands
}

fn parse_numbers(args: &[&str]) -> Result<Vec<f64>, PathError> {
    args.iter()
        .map(|a| a.parse::<f64>().map_err(|_| PathError::InvalidNumber((*a).to_string())))
        .collect()
}

/// Incremental parser state shared by the strict and lenient entry points.
#[derive(Default)]
struct Cursor {
    current: Point,
    last: Option<Segment>,
    segments: Vec<Segment>,
}

impl Cursor {
    fn apply(&mut self, command: char, args: &[&str]) -> Result<(), PathError> {
        let expected = match command.to_ascii_uppercase() {
            'M' | 'L' | 'T' => 2,
            'Q' => 4,
            _ => return Err(PathError::UnknownCommand(command)),
        };
        let nums = parse_numbers(args)?;
        if nums.is_empty() || nums.len() % expected != 0 {
            return Err(PathError::MissingCoordinates {
                command,
                expected,
                found: nums.len(),
            });
        }

        let relative = command.is_ascii_lowercase();
        for (n, chunk) in nums.chunks(expected).enumerate() {
            let origin = if relative { self.current } else { Point::ZERO };
            let at = |i: usize| Point::new(origin.x + chunk[i], origin.y + chunk[i + 1]);

            let segment = match command.to_ascii_uppercase() {
                // Extra pairs after a moveto are implicit linetos.
                'M' if n == 0 => Segment::move_to(at(0)),
                'M' | 'L' => Segment::line_to(at(0)),
                'Q' => Segment::quad_to(at(0), at(2)),
                _ => {
                    let control = match self.last {
                        Some(prev) if prev.is_quadratic() => {
                            let c = prev.control.unwrap_or(self.current);
                            self.current + (self.current - c)
                        }
                        _ => self.current,
                    };
                    Segment {
                        kind: SegmentKind::SmoothQuad,
                        end: at(0),
                        control: Some(control),
                    }
                }
            };
            self.current = segment.end;
            self.last = Some(segment);
            self.segments.push(segment);
        }
        Ok(())
    }
}

/// Parse path data, failing on the first malformed command.
pub fn parse_strict(data: &PathSpec) -> Result<Vec<Segment>, PathError> {
    let mut cursor = Cursor::default();
    for (command, args) in tokenize(data.as_str()) {
        cursor.apply(command, &args)?;
    }
    Ok(cursor.segments)
}

/// Parse path data, skipping malformed commands.
///
/// Never fails: every skipped command is logged at `warn` level and parsing
/// resumes from the last good point.
pub fn parse(data: &PathSpec) -> Vec<Segment> {
    let mut cursor = Cursor::default();
    for (command, args) in tokenize(data.as_str()) {
        if let Err(err) = cursor.apply(command, &args) {
            log::warn!("Skipping path command: {}", err);
        }
    }
    cursor.segments
}

/// Group maximal runs of segments for which `inside` is false.
///
/// A run that does not begin at the path's first `Move` is re-anchored: its first
/// segment becomes a `Move` to that segment's end point, since its start lies
/// inside the predicate. Runs reduced to a lone `Move` carry nothing visible
/// and are dropped.
pub fn split_by_predicate<F>(segments: &[Segment], inside: F) -> Vec<Vec<Segment>>
where
    F: Fn(&Segment) -> bool,
{
    split_marked(segments.iter().map(|s| (*s, inside(s))))
}

/// Like [`split_by_predicate`], over segments already flagged as inside.
///
/// Callers that cut segments themselves emit the outside pieces unflagged and
/// insert a `Move` where a cut piece resumes.
pub fn split_marked<I>(marked: I) -> Vec<Vec<Segment>>
where
    I: IntoIterator<Item = (Segment, bool)>,
{
    let mut groups: Vec<Vec<Segment>> = Vec::new();
    let mut current: Vec<Segment> = Vec::new();

    for (segment, inside) in marked {
        if inside {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            continue;
        }
        if current.is_empty() || segment.kind == SegmentKind::Move {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            current.push(Segment::move_to(segment.end));
        } else {
            current.push(segment);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    groups.retain(|g| g.len() >= 2);
    groups
}

/// Re-emit segments as path data.
///
/// A `T` segment whose emitted predecessor is not quadratic is written as an
/// explicit `Q` with its reconstructed control point.
pub fn render(segments: &[Segment]) -> PathSpec {
    let mut out = String::new();
    let mut prev_quadratic = false;

    for segment in segments {
        if !out.is_empty() {
            out.push(' ');
        }
        match segment.kind {
            SegmentKind::Move => out.push('M'),
            SegmentKind::Line => out.push('L'),
            SegmentKind::Quad => {
                out.push('Q');
                fmt_point(&mut out, segment.control.unwrap_or(segment.end));
            }
            SegmentKind::SmoothQuad if prev_quadratic => out.push('T'),
            SegmentKind::SmoothQuad => {
                out.push('Q');
                fmt_point(&mut out, segment.control.unwrap_or(segment.end));
            }
        }
        fmt_point(&mut out, segment.end);
        prev_quadratic = segment.is_quadratic();
    }

    PathSpec(out)
}

/// Build a kurbo path for bounds and hit testing.
pub fn to_bez_path(segments: &[Segment]) -> BezPath {
    let mut path = BezPath::new();
    for segment in segments {
        match segment.kind {
            SegmentKind::Move => path.move_to(segment.end),
            _ if path.elements().is_empty() => path.move_to(segment.end),
            SegmentKind::Line => path.line_to(segment.end),
            SegmentKind::Quad | SegmentKind::SmoothQuad => {
                path.quad_to(segment.control.unwrap_or(segment.end), segment.end)
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_build_smooth_path_short_traces() {
        assert!(build_smooth_path(&[]).is_empty());
        assert_eq!(build_smooth_path(&[pt(1.0, 2.0)]).as_str(), "M 1 2");
        assert_eq!(
            build_smooth_path(&[pt(0.0, 0.0), pt(10.0, 5.0)]).as_str(),
            "M 0 0 L 10 5"
        );
    }

    #[test]
    fn test_build_smooth_path_uses_midpoints() {
        let data = build_smooth_path(&[pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 10.0), pt(30.0, 10.0)]);
        assert_eq!(data.as_str(), "M 0 0 Q 10 0 15 5 T 25 10 T 30 10");
    }

    #[test]
    fn test_parse_reconstructs_reflected_control() {
        let segments = parse_strict(&PathSpec::from("M 0 0 Q 10 0 15 5 T 25 10")).unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].kind, SegmentKind::SmoothQuad);
        // Reflection of (10, 0) about (15, 5).
        assert_eq!(segments[2].control, Some(pt(20.0, 10.0)));
    }

    #[test]
    fn test_parse_relative_commands() {
        let segments = parse_strict(&PathSpec::from("m10,10 l5 0 q 5 5 10 0")).unwrap();
        assert_eq!(segments[0].end, pt(10.0, 10.0));
        assert_eq!(segments[1].end, pt(15.0, 10.0));
        assert_eq!(segments[2].control, Some(pt(20.0, 15.0)));
        assert_eq!(segments[2].end, pt(25.0, 10.0));
    }

    #[test]
    fn test_parse_smooth_without_quadratic_predecessor() {
        let segments = parse_strict(&PathSpec::from("M 0 0 L 10 0 T 20 0")).unwrap();
        assert_eq!(segments[2].control, Some(pt(10.0, 0.0)));
    }

    #[test]
    fn test_parse_compact_negative_numbers() {
        let segments = parse_strict(&PathSpec::from("M10-5L-3.5e1-2")).unwrap();
        assert_eq!(segments[0].end, pt(10.0, -5.0));
        assert_eq!(segments[1].end, pt(-35.0, -2.0));
    }

    #[test]
    fn test_parse_strict_errors() {
        assert_eq!(
            parse_strict(&PathSpec::from("M 0 0 Z")),
            Err(PathError::UnknownCommand('Z'))
        );
        assert!(matches!(
            parse_strict(&PathSpec::from("M 0 0 Q 1 2 3")),
            Err(PathError::MissingCoordinates { command: 'Q', expected: 4, found: 3 })
        ));
        assert_eq!(
            parse_strict(&PathSpec::from("M 0 0 L 1.2.3 4")),
            Err(PathError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(
            parse_strict(&PathSpec::from("M 0 0 L 1 2 x 3 4")),
            Err(PathError::UnknownCommand('x'))
        );
    }

    #[test]
    fn test_parse_lenient_skips_bad_commands() {
        let segments = parse(&PathSpec::from("M 0 0 L 5 Z L 10 0"));
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].end, pt(10.0, 0.0));
    }

    #[test]
    fn test_split_three_regions() {
        let data = PathSpec::from("M 0 0 L 10 0 L 20 0 L 50 0 L 80 0 L 90 0 L 50 5 L 10 5 L 0 5");
        let segments = parse(&data);
        let center = pt(50.0, 0.0);
        let groups = split_by_predicate(&segments, |s| s.end.distance(center) <= 10.0);
        assert_eq!(groups.len(), 3);
        assert_eq!(render(&groups[0]).as_str(), "M 0 0 L 10 0 L 20 0");
        assert_eq!(render(&groups[1]).as_str(), "M 80 0 L 90 0");
        assert_eq!(render(&groups[2]).as_str(), "M 10 5 L 0 5");
    }

    #[test]
    fn test_split_all_inside_and_untouched() {
        let segments = parse(&PathSpec::from("M 0 0 L 1 0 L 2 0"));
        assert!(split_by_predicate(&segments, |_| true).is_empty());
        let groups = split_by_predicate(&segments, |_| false);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], segments);
    }

    #[test]
    fn test_split_drops_lone_points() {
        // Only the final point survives: a single Move draws nothing.
        let segments = parse(&PathSpec::from("M 0 0 L 10 0 L 20 0"));
        let groups = split_by_predicate(&segments, |s| s.end.x < 15.0);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_render_makes_detached_smooth_segment_explicit() {
        let segments = parse(&PathSpec::from("M 0 0 Q 10 0 15 5 T 25 10 T 30 10"));
        // Erasing the first curve leaves the start point alone (dropped) and a
        // tail whose T lost its quadratic predecessor.
        let groups = split_by_predicate(&segments, |s| s.end == pt(15.0, 5.0));
        assert_eq!(groups.len(), 1);
        assert_eq!(render(&groups[0]).as_str(), "M 25 10 Q 30 10 30 10");

        // Unbroken chains keep their shorthand.
        assert_eq!(render(&segments).as_str(), "M 0 0 Q 10 0 15 5 T 25 10 T 30 10");
    }

    #[test]
    fn test_to_bez_path_bounds() {
        use kurbo::Shape;
        let segments = parse(&PathSpec::from("M 0 0 L 10 0 L 10 20"));
        let bbox = to_bez_path(&segments).bounding_box();
        assert_eq!(bbox, kurbo::Rect::new(0.0, 0.0, 10.0, 20.0));
    }
}
