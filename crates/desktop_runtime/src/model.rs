//! Desktop window-manager state.

use std::collections::BTreeSet;

use desktop_app_contract::{ApplicationId, DesktopThemeId};
use serde::{Deserialize, Serialize};

use crate::icons::IconName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub icon: IconName,
    /// Stored geometry. Left untouched while maximized.
    pub rect: WindowRect,
    /// Higher values render above lower ones.
    pub stack_order: u64,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowRecord {
    /// Geometry to render: the stored rect, or `viewport` while maximized.
    pub fn effective_rect(&self, viewport: WindowRect) -> WindowRect {
        if self.maximized {
            viewport
        } else {
            self.rect
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Placement of new windows and the area reserved for shell bars.
pub struct ShellLayout {
    /// Position of the first window on both axes.
    pub cascade_origin: i32,
    /// Per-open-window offset on both axes.
    pub cascade_step: i32,
    /// Height withheld from maximized windows.
    pub reserved_band_px: i32,
}

impl Default for ShellLayout {
    fn default() -> Self {
        Self {
            cascade_origin: 50,
            cascade_step: 30,
            reserved_band_px: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Behavior switches for the window manager.
pub struct ShellPolicy {
    /// After closing the focused window, focus the topmost remaining visible window.
    pub refocus_on_close: bool,
    /// Launching an app whose only windows are minimized restores one instead of opening another.
    pub restore_minimized_on_launch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub layout: ShellLayout,
    pub policy: ShellPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopState {
    /// Open windows in launch order.
    pub windows: Vec<WindowRecord>,
    pub focused_window: Option<WindowId>,
    pub next_window_id: u64,
    pub next_stack_order: u64,
    pub theme: DesktopThemeId,
    pub config: ShellConfig,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl DesktopState {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            windows: Vec::new(),
            focused_window: None,
            next_window_id: 1,
            next_stack_order: 1,
            theme: DesktopThemeId::default(),
            config,
        }
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn window_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }

    /// Distinct app ids with at least one open window, minimized or not.
    pub fn running_app_ids(&self) -> BTreeSet<ApplicationId> {
        self.windows.iter().map(|w| w.app_id.clone()).collect()
    }

    pub fn focused_app_id(&self) -> Option<&ApplicationId> {
        self.focused_window
            .and_then(|id| self.window(id))
            .map(|w| &w.app_id)
    }

    /// Highest stack order held by any open window.
    pub fn max_stack_order(&self) -> Option<u64> {
        self.windows.iter().map(|w| w.stack_order).max()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer position minus window origin at gesture start.
    pub offset: PointerPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub start_w: i32,
    pub start_h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl Gesture {
    pub fn window_id(self) -> WindowId {
        match self {
            Self::Dragging(session) => session.window_id,
            Self::Resizing(session) => session.window_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub gesture: Option<Gesture>,
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Some(Gesture::Dragging(_)))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Some(Gesture::Resizing(_)))
    }
}
