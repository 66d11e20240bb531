//! Window-manager transition helpers and gesture geometry used by the desktop reducer.

use crate::model::{
    DesktopState, DragSession, PointerPosition, ResizeSession, ShellLayout, WindowId, WindowRect,
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 200;

/// Rect for a newly launched window while `open_windows` windows are already open.
pub fn cascade_rect(layout: ShellLayout, open_windows: usize, w: i32, h: i32) -> WindowRect {
    let step = i32::try_from(open_windows)
        .unwrap_or(i32::MAX)
        .saturating_mul(layout.cascade_step);
    let origin = layout.cascade_origin.saturating_add(step);
    WindowRect {
        x: origin,
        y: origin,
        w,
        h,
    }
    .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}

/// Focuses `window_id`, raising it unless it already holds the highest stack order.
///
/// Always clears `minimized`. Returns `false` when the window does not exist.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    let max_stack_order = state.max_stack_order();
    let next_stack_order = state.next_stack_order;
    let Some(window) = state.window_mut(window_id) else {
        return false;
    };

    let raised = if max_stack_order == Some(window.stack_order) {
        false
    } else {
        window.stack_order = next_stack_order;
        true
    };
    window.minimized = false;
    if raised {
        state.next_stack_order += 1;
    }
    state.focused_window = Some(window_id);
    true
}

/// Visible window with the highest stack order.
pub fn topmost_visible_window(state: &DesktopState) -> Option<WindowId> {
    state
        .windows
        .iter()
        .filter(|w| !w.minimized)
        .max_by_key(|w| w.stack_order)
        .map(|w| w.id)
}

/// Starts a drag by recording the pointer's offset from the window origin.
pub fn begin_drag(window_id: WindowId, rect: WindowRect, pointer: PointerPosition) -> DragSession {
    DragSession {
        window_id,
        offset: PointerPosition {
            x: pointer.x - rect.x,
            y: pointer.y - rect.y,
        },
    }
}

/// Rect for the current drag pointer: origin follows the pointer, size unchanged.
pub fn drag_rect(session: DragSession, rect: WindowRect, pointer: PointerPosition) -> WindowRect {
    WindowRect {
        x: pointer.x - session.offset.x,
        y: pointer.y - session.offset.y,
        ..rect
    }
}

/// Starts a bottom-right resize from the window's current size.
pub fn begin_resize(
    window_id: WindowId,
    rect: WindowRect,
    pointer: PointerPosition,
) -> ResizeSession {
    ResizeSession {
        window_id,
        pointer_start: pointer,
        start_w: rect.w,
        start_h: rect.h,
    }
}

/// Rect for the current resize pointer: origin unchanged, size floored at the minimum.
pub fn resize_rect(
    session: ResizeSession,
    rect: WindowRect,
    pointer: PointerPosition,
) -> WindowRect {
    let dx = pointer.x - session.pointer_start.x;
    let dy = pointer.y - session.pointer_start.y;
    WindowRect {
        w: (session.start_w + dx).max(MIN_WINDOW_WIDTH),
        h: (session.start_h + dy).max(MIN_WINDOW_HEIGHT),
        ..rect
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> WindowRect {
        WindowRect { x, y, w, h }
    }

    #[test]
    fn cascade_offsets_by_open_window_count() {
        let layout = ShellLayout::default();
        assert_eq!(cascade_rect(layout, 0, 500, 400), rect(50, 50, 500, 400));
        assert_eq!(cascade_rect(layout, 3, 500, 400), rect(140, 140, 500, 400));
        assert_eq!(cascade_rect(layout, 1, 100, 100), rect(80, 80, 300, 200));
    }

    #[test]
    fn drag_keeps_grab_point_under_pointer() {
        let start = rect(100, 80, 400, 300);
        let session = begin_drag(WindowId(1), start, PointerPosition { x: 130, y: 95 });
        assert_eq!(session.offset, PointerPosition { x: 30, y: 15 });

        let moved = drag_rect(session, start, PointerPosition { x: 10, y: -40 });
        assert_eq!(moved, rect(-20, -55, 400, 300));
    }

    #[test]
    fn resize_floors_size_and_keeps_origin() {
        let start = rect(10, 20, 400, 300);
        let session = begin_resize(WindowId(1), start, PointerPosition { x: 410, y: 320 });

        assert_eq!(
            resize_rect(session, start, PointerPosition { x: 460, y: 345 }),
            rect(10, 20, 450, 325)
        );
        assert_eq!(
            resize_rect(session, start, PointerPosition { x: -500, y: -500 }),
            rect(10, 20, MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
        );
    }
}
