//! # Path interpreter
//!
//! A single left-to-right pass over the tokens of one path-data string. The
//! interpreter owns all cursor bookkeeping (relative coordinates, implicit
//! line-tos after a move, shorthand control-point reflection) and hands every
//! resolved, absolute segment to a [`PathSink`]. Measuring, rewriting and
//! flattening are all sinks, so the three can never disagree about what a
//! path means.

use crate::error::PathError;
use crate::geometry::Point;

use super::tokenizer::{tokenize_with_offsets, Token};

/// One drawing step with every coordinate absolute and every control point
/// explicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    /// Produced by `L`, `H` and `V` alike.
    LineTo(Point),
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    QuadTo {
        ctrl: Point,
        to: Point,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    /// Returns the cursor to `to`, the start of the current subpath.
    ClosePath {
        to: Point,
    },
}

/// Receives segments in order. `from` is the cursor before the segment.
pub trait PathSink {
    fn segment(&mut self, from: Point, segment: &Segment);
}

/// Mutable cursor state for one pass over one path-data string.
#[derive(Debug, Clone, Default)]
pub struct InterpreterState {
    pub cursor: Point,
    pub subpath_start: Point,
    /// Second control point of the previous segment, if it was a cubic.
    pub last_cubic_control: Option<Point>,
    /// Control point of the previous segment, if it was a quadratic.
    pub last_quad_control: Option<Point>,
    pub active_command: Option<char>,
}

impl InterpreterState {
    fn clear_controls(&mut self) {
        self.last_cubic_control = None;
        self.last_quad_control = None;
    }
}

/// Walks `data`, feeding every segment to `sink`.
pub fn interpret<S: PathSink + ?Sized>(data: &str, sink: &mut S) -> Result<(), PathError> {
    let tokens = tokenize_with_offsets(data)?;
    let mut state = InterpreterState::default();
    let mut ops = Operands { tokens: &tokens, pos: 0 };

    while let Some((offset, token)) = ops.peek_with_offset() {
        if let Token::Command(c) = token {
            ops.pos += 1;
            state.active_command = Some(c);
            if matches!(c, 'Z' | 'z') {
                let from = state.cursor;
                state.cursor = state.subpath_start;
                state.clear_controls();
                sink.segment(from, &Segment::ClosePath { to: state.subpath_start });
                continue;
            }
        } else {
            match state.active_command {
                None => {
                    return Err(PathError::MalformedPathData {
                        offset,
                        reason: "path data must start with a command".to_string(),
                    })
                }
                Some('Z' | 'z') => {
                    return Err(PathError::MalformedPathData {
                        offset,
                        reason: "close-path takes no numbers".to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        let command = match state.active_command {
            Some(c) => c,
            None => continue,
        };
        step(command, &mut state, &mut ops, sink)?;
    }

    Ok(())
}

/// Consumes one operand group for `command`.
fn step<S: PathSink + ?Sized>(
    command: char,
    state: &mut InterpreterState,
    ops: &mut Operands<'_>,
    sink: &mut S,
) -> Result<(), PathError> {
    let relative = command.is_ascii_lowercase();
    let origin = if relative { state.cursor } else { Point::default() };
    let from = state.cursor;

    match command {
        'M' | 'm' => {
            let to = ops.point(command, 2, origin)?;
            state.cursor = to;
            state.subpath_start = to;
            state.clear_controls();
            // Further pairs are implicit line-tos of the same relativity.
            state.active_command = Some(if relative { 'l' } else { 'L' });
            sink.segment(from, &Segment::MoveTo(to));
        }
        'L' | 'l' => {
            let to = ops.point(command, 2, origin)?;
            state.cursor = to;
            state.clear_controls();
            sink.segment(from, &Segment::LineTo(to));
        }
        'H' | 'h' => {
            let x = ops.number(command, 1)? + origin.x;
            let to = Point::new(x, from.y);
            state.cursor = to;
            state.clear_controls();
            sink.segment(from, &Segment::LineTo(to));
        }
        'V' | 'v' => {
            let y = ops.number(command, 1)? + origin.y;
            let to = Point::new(from.x, y);
            state.cursor = to;
            state.clear_controls();
            sink.segment(from, &Segment::LineTo(to));
        }
        'C' | 'c' => {
            let ctrl1 = ops.point(command, 6, origin)?;
            let ctrl2 = ops.point(command, 6, origin)?;
            let to = ops.point(command, 6, origin)?;
            cubic(state, sink, from, ctrl1, ctrl2, to);
        }
        'S' | 's' => {
            let ctrl1 = match state.last_cubic_control {
                Some(prev) => prev.reflect_about(from),
                None => from,
            };
            let ctrl2 = ops.point(command, 4, origin)?;
            let to = ops.point(command, 4, origin)?;
            cubic(state, sink, from, ctrl1, ctrl2, to);
        }
        'Q' | 'q' => {
            let ctrl = ops.point(command, 4, origin)?;
            let to = ops.point(command, 4, origin)?;
            quad(state, sink, from, ctrl, to);
        }
        'T' | 't' => {
            let ctrl = match state.last_quad_control {
                Some(prev) => prev.reflect_about(from),
                None => from,
            };
            let to = ops.point(command, 2, origin)?;
            quad(state, sink, from, ctrl, to);
        }
        'A' | 'a' => {
            let rx = ops.number(command, 7)?;
            let ry = ops.number(command, 7)?;
            let x_rotation = ops.number(command, 7)?;
            let large_arc = ops.flag(command, 7)?;
            let sweep = ops.flag(command, 7)?;
            let to = ops.point(command, 7, origin)?;
            state.cursor = to;
            state.clear_controls();
            sink.segment(
                from,
                &Segment::ArcTo { rx, ry, x_rotation, large_arc, sweep, to },
            );
        }
        other => return Err(PathError::UnsupportedPathCommand(other)),
    }

    Ok(())
}

fn cubic<S: PathSink + ?Sized>(
    state: &mut InterpreterState,
    sink: &mut S,
    from: Point,
    ctrl1: Point,
    ctrl2: Point,
    to: Point,
) {
    state.cursor = to;
    state.last_cubic_control = Some(ctrl2);
    state.last_quad_control = None;
    sink.segment(from, &Segment::CubicTo { ctrl1, ctrl2, to });
}

fn quad<S: PathSink + ?Sized>(state: &mut InterpreterState, sink: &mut S, from: Point, ctrl: Point, to: Point) {
    state.cursor = to;
    state.last_quad_control = Some(ctrl);
    state.last_cubic_control = None;
    sink.segment(from, &Segment::QuadTo { ctrl, to });
}

struct Operands<'a> {
    tokens: &'a [(usize, Token)],
    pos: usize,
}

impl Operands<'_> {
    fn peek_with_offset(&self) -> Option<(usize, Token)> {
        self.tokens.get(self.pos).copied()
    }

    fn peek(&self) -> Option<Token> {
        self.peek_with_offset().map(|(_, token)| token)
    }

    /// Reads one number; `expected` is the command's full operand count, used
    /// in the error.
    fn number(&mut self, command: char, expected: usize) -> Result<f64, PathError> {
        match self.peek() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(n)
            }
            _ => Err(PathError::TruncatedPathData { command, expected }),
        }
    }

    fn point(&mut self, command: char, expected: usize, origin: Point) -> Result<Point, PathError> {
        let x = self.number(command, expected)?;
        let y = self.number(command, expected)?;
        Ok(origin.offset(x, y))
    }

    fn flag(&mut self, command: char, expected: usize) -> Result<bool, PathError> {
        Ok(self.number(command, expected)?.trunc() != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(Point, Segment)>);

    impl PathSink for Recorder {
        fn segment(&mut self, from: Point, segment: &Segment) {
            self.0.push((from, *segment));
        }
    }

    fn record(data: &str) -> Vec<Segment> {
        let mut rec = Recorder::default();
        interpret(data, &mut rec).unwrap();
        rec.0.into_iter().map(|(_, s)| s).collect()
    }

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_implicit_line_after_move() {
        let segs = record("M1 1 2 2 3 3");
        assert_eq!(
            segs,
            vec![Segment::MoveTo(p(1.0, 1.0)), Segment::LineTo(p(2.0, 2.0)), Segment::LineTo(p(3.0, 3.0))]
        );
    }

    #[test]
    fn test_relative_move_implicit_lines_stay_relative() {
        let segs = record("m1 1 2 2");
        assert_eq!(segs, vec![Segment::MoveTo(p(1.0, 1.0)), Segment::LineTo(p(3.0, 3.0))]);
    }

    #[test]
    fn test_horizontal_vertical() {
        let segs = record("M1 2 H5 v3 h-1 V0");
        assert_eq!(
            segs,
            vec![
                Segment::MoveTo(p(1.0, 2.0)),
                Segment::LineTo(p(5.0, 2.0)),
                Segment::LineTo(p(5.0, 5.0)),
                Segment::LineTo(p(4.0, 5.0)),
                Segment::LineTo(p(4.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let mut rec = Recorder::default();
        interpret("M1 1 L5 1 Z l1 1", &mut rec).unwrap();
        assert_eq!(rec.0[2], (p(5.0, 1.0), Segment::ClosePath { to: p(1.0, 1.0) }));
        assert_eq!(rec.0[3], (p(1.0, 1.0), Segment::LineTo(p(2.0, 2.0))));
    }

    #[test]
    fn test_smooth_cubic_reflects_previous_control() {
        let segs = record("C 0,0 10,0 10,10 S 10,20 0,20");
        assert_eq!(
            segs[1],
            Segment::CubicTo { ctrl1: p(10.0, 20.0), ctrl2: p(10.0, 20.0), to: p(0.0, 20.0) }
        );

        let segs = record("M0 0 C 0,5 5,10 10,10 s 5,-5 10,-10");
        assert_eq!(
            segs[2],
            Segment::CubicTo { ctrl1: p(15.0, 10.0), ctrl2: p(15.0, 5.0), to: p(20.0, 0.0) }
        );
    }

    #[test]
    fn test_smooth_cubic_without_previous_uses_cursor() {
        let segs = record("M2 3 L4 4 S 8,8 10,10");
        assert_eq!(
            segs[2],
            Segment::CubicTo { ctrl1: p(4.0, 4.0), ctrl2: p(8.0, 8.0), to: p(10.0, 10.0) }
        );
    }

    #[test]
    fn test_smooth_quad_reflection_and_reset() {
        let segs = record("M0 0 Q5 10 10 0 T20 0");
        assert_eq!(segs[2], Segment::QuadTo { ctrl: p(15.0, -10.0), to: p(20.0, 0.0) });

        // A cubic in between breaks the chain.
        let segs = record("M0 0 Q5 10 10 0 C10 0 10 0 10 0 T20 0");
        assert_eq!(segs[3], Segment::QuadTo { ctrl: p(10.0, 0.0), to: p(20.0, 0.0) });
    }

    #[test]
    fn test_move_clears_shorthand_memory() {
        let segs = record("M0 0 C0 5 5 10 10 10 M10 10 S15 5 20 0");
        assert_eq!(
            segs[3],
            Segment::CubicTo { ctrl1: p(10.0, 10.0), ctrl2: p(15.0, 5.0), to: p(20.0, 0.0) }
        );
    }

    #[test]
    fn test_relative_arc() {
        let segs = record("M10 10 a5 5 0 1 0 10 0");
        assert_eq!(
            segs[1],
            Segment::ArcTo { rx: 5.0, ry: 5.0, x_rotation: 0.0, large_arc: true, sweep: false, to: p(20.0, 10.0) }
        );
    }

    #[test]
    fn test_unsupported_command() {
        let mut rec = Recorder::default();
        assert_eq!(interpret("M0 0 X 1 2", &mut rec), Err(PathError::UnsupportedPathCommand('X')));
    }

    #[test]
    fn test_truncated() {
        let mut rec = Recorder::default();
        assert_eq!(
            interpret("M0 0 C1 1 2 2 3", &mut rec),
            Err(PathError::TruncatedPathData { command: 'C', expected: 6 })
        );
        assert_eq!(
            interpret("M0 0 L Z", &mut rec),
            Err(PathError::TruncatedPathData { command: 'L', expected: 2 })
        );
    }

    #[test]
    fn test_numbers_before_command() {
        let mut rec = Recorder::default();
        assert!(matches!(interpret("  1 2 L3 4", &mut rec), Err(PathError::MalformedPathData { offset: 2, .. })));
    }

    #[test]
    fn test_numbers_after_close() {
        let mut rec = Recorder::default();
        assert!(matches!(
            interpret("M0 0 L1 1 Z 3 4", &mut rec),
            Err(PathError::MalformedPathData { offset: 12, .. })
        ));
    }
}
