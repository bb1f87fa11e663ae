//! Translates the generic `pointer*+pause` gesture vocabulary into the
//! `press/move/release` vocabulary the DeviceKit JSON-RPC agent expects.
//!
//! Accumulated `pause` durations fold into the following action's duration;
//! a `pointerDown` absorbs the coordinates of an immediately following
//! `pointerMove` rather than emitting two actions for one touch-down.
//! Durations stay in milliseconds internally; callers convert to seconds
//! (`ms / 1000`) when building the wire request.

use crate::models::screen::{TapAction, TapActionKind};

pub fn translate_to_press_move_release(actions: &[TapAction]) -> Vec<TapAction> {
    let mut out = Vec::new();
    let mut current = (0.0_f64, 0.0_f64);
    let mut accumulated_pause_ms: u64 = 0;

    let mut i = 0;
    while i < actions.len() {
        let action = &actions[i];
        match action.kind {
            TapActionKind::Pause => {
                accumulated_pause_ms += action.duration_ms.unwrap_or(0);
            }
            TapActionKind::PointerMove => {
                if let (Some(x), Some(y)) = (action.x, action.y) {
                    current = (x, y);
                }
                out.push(
                    TapAction::new(TapActionKind::Move)
                        .at(current.0, current.1)
                        .with_duration_ms(accumulated_pause_ms),
                );
                accumulated_pause_ms = 0;
            }
            TapActionKind::PointerDown => {
                if let Some(next) = actions.get(i + 1) {
                    if next.kind == TapActionKind::PointerMove {
                        if let (Some(x), Some(y)) = (next.x, next.y) {
                            current = (x, y);
                        }
                        i += 1;
                    }
                }
                out.push(
                    TapAction::new(TapActionKind::Press)
                        .at(current.0, current.1)
                        .with_duration_ms(accumulated_pause_ms),
                );
                accumulated_pause_ms = 0;
            }
            TapActionKind::PointerUp => {
                out.push(
                    TapAction::new(TapActionKind::Release)
                        .at(current.0, current.1)
                        .with_duration_ms(accumulated_pause_ms),
                );
                accumulated_pause_ms = 0;
            }
            // Already native; pass through untouched.
            TapActionKind::Press | TapActionKind::Move | TapActionKind::Release => {
                out.push(*action);
            }
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_move_down_pause_up_round_trips() {
        let input = vec![
            TapAction::new(TapActionKind::PointerMove).at(10.0, 20.0),
            TapAction::new(TapActionKind::PointerDown),
            TapAction::new(TapActionKind::Pause).with_duration_ms(250),
            TapAction::new(TapActionKind::PointerUp),
        ];
        let out = translate_to_press_move_release(&input);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].kind, TapActionKind::Move);
        assert_eq!((out[0].x, out[0].y), (Some(10.0), Some(20.0)));
        assert_eq!(out[0].duration_ms, Some(0));

        assert_eq!(out[1].kind, TapActionKind::Press);
        assert_eq!((out[1].x, out[1].y), (Some(10.0), Some(20.0)));
        assert_eq!(out[1].duration_ms, Some(0));

        assert_eq!(out[2].kind, TapActionKind::Release);
        assert_eq!(out[2].duration_ms, Some(250));
    }

    #[test]
    fn pointer_down_absorbs_following_pointer_move() {
        let input = vec![
            TapAction::new(TapActionKind::PointerDown),
            TapAction::new(TapActionKind::PointerMove).at(5.0, 6.0),
            TapAction::new(TapActionKind::PointerUp),
        ];
        let out = translate_to_press_move_release(&input);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, TapActionKind::Press);
        assert_eq!((out[0].x, out[0].y), (Some(5.0), Some(6.0)));
        assert_eq!(out[1].kind, TapActionKind::Release);
    }

    #[test]
    fn native_actions_pass_through_unchanged() {
        let input = vec![TapAction::new(TapActionKind::Press).at(1.0, 2.0)];
        let out = translate_to_press_move_release(&input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, TapActionKind::Press);
    }
}
