//! Reducer actions, side-effect intents, and transition logic for a desktop session.
//!
//! [`reduce_desktop`] is the only writer of a [`DesktopSession`]. It routes each discrete input
//! event to the engine that owns the affected state and enforces the single-active-gesture rule.
//! Failed actions return a [`ReducerError`] and leave the session untouched.

use thiserror::Error;

use crate::{
    apps,
    geometry::{Point, Rect, Size},
    model::{
        ActiveGesture, ChromePart, ContextMenuCommand, ContextMenuEntry, DragSession, IconId,
        IconKind, IconRecord, OpenWindowRequest, PointerTarget, ResizeEdge, ResizeSession,
        WindowId, WindowPatch,
    },
    session::DesktopSession,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Keyboard commands the desktop reacts to while no text input has focus.
pub enum KeyCommand {
    /// Delete the selected file and folder icons.
    Delete,
    /// Rename the single selected icon.
    Rename,
    /// Open every selected icon.
    Open,
    /// Abort the active gesture or rename and close transient menus.
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate a [`DesktopSession`].
pub enum DesktopAction {
    /// Report the browser viewport size.
    SetViewport {
        /// Full viewport, taskbar included.
        size: Size,
    },
    /// Report measured icon bounds for rubber-band hit testing.
    SetRenderedIconBounds {
        /// Container-relative bounds per icon.
        bounds: Vec<(IconId, Rect)>,
    },
    /// Pointer pressed on a hit-tested target.
    PointerDown {
        /// What the pointer went down on.
        target: PointerTarget,
        /// Container-relative pointer position.
        pointer: Point,
        /// Event timestamp in milliseconds.
        at_ms: u64,
    },
    /// Pointer moved while a gesture may be active.
    PointerMove {
        /// Container-relative pointer position.
        pointer: Point,
    },
    /// Pointer released; finalizes the active gesture.
    PointerUp {
        /// Container-relative pointer position.
        pointer: Point,
        /// Event timestamp in milliseconds.
        at_ms: u64,
    },
    /// Pointer left the desktop surface; finalizes the active gesture at its last position.
    PointerLeave {
        /// Event timestamp in milliseconds.
        at_ms: u64,
    },
    /// Pointer capture lost; aborts the active gesture.
    PointerCancel,
    /// Single click on an icon.
    IconClick {
        /// Clicked icon.
        icon_id: IconId,
        /// Whether shift was held (toggle membership).
        shift: bool,
    },
    /// Double click on an icon (open its window).
    IconDoubleClick {
        /// Icon to open.
        icon_id: IconId,
    },
    /// Click on the empty desktop background.
    BackgroundClick,
    /// Open a window, or focus it when the id is already open.
    OpenWindow(OpenWindowRequest),
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Minimize a window from its chrome.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Patch window geometry or flags.
    UpdateWindow {
        /// Window to update.
        window_id: WindowId,
        /// Fields to replace.
        patch: WindowPatch,
    },
    /// Taskbar button click (focus, minimize, or restore).
    TaskbarActivate {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Request the context menu for an icon or the background.
    OpenContextMenu {
        /// Icon under the pointer, `None` for the background.
        target: Option<IconId>,
        /// Menu anchor, container-relative.
        at: Point,
    },
    /// Run a context-menu command.
    RunContextCommand {
        /// Chosen command.
        command: ContextMenuCommand,
        /// Icon the menu was opened on, `None` for the background.
        target: Option<IconId>,
    },
    /// Enter in-place rename for an icon.
    BeginRename {
        /// Icon to rename.
        icon_id: IconId,
    },
    /// Finish in-place rename with the edited title.
    CommitRename {
        /// Icon being renamed.
        icon_id: IconId,
        /// Edited title; blank titles are discarded.
        title: String,
    },
    /// Abandon in-place rename.
    CancelRename,
    /// Keyboard shortcut.
    KeyDown {
        /// Mapped command.
        command: KeyCommand,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Launch a catalog app from the start menu.
    LaunchApp {
        /// Catalog app id.
        app_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the renderer to execute.
pub enum RuntimeEffect {
    /// Move keyboard focus into the newly focused window.
    FocusWindowInput(WindowId),
    /// Show the context menu.
    ShowContextMenu {
        /// Icon the menu targets, `None` for the background.
        target: Option<IconId>,
        /// Anchor point, container-relative.
        at: Point,
        /// Commands in display order.
        entries: Vec<ContextMenuEntry>,
    },
    /// Hide any visible context menu.
    DismissContextMenu,
    /// Move keyboard focus into the rename field of an icon.
    FocusRenameInput(IconId),
    /// The selected set changed; carries the new set in insertion order.
    SelectionChanged(Vec<IconId>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot apply to the current session.
pub enum ReducerError {
    /// The target window id is not open.
    #[error("window `{0}` not found")]
    WindowNotFound(WindowId),
    /// The target icon id does not exist.
    #[error("icon `{0}` not found")]
    IconNotFound(IconId),
    /// App icons cannot be deleted, duplicated, or renamed from the menu.
    #[error("icon `{0}` is an app icon and cannot be modified")]
    IconLocked(IconId),
    /// A pointer gesture is already active.
    #[error("a pointer gesture is already in progress")]
    GestureInProgress,
    /// The icon is being renamed.
    #[error("icon `{0}` is being renamed")]
    RenameInProgress(IconId),
    /// No catalog app has this id.
    #[error("unknown app `{0}`")]
    UnknownApp(String),
}

/// Applies a [`DesktopAction`] to the session and collects resulting side effects.
///
/// # Errors
///
/// Returns a [`ReducerError`] when the action references a missing window, icon, or app, targets
/// a locked app icon, or conflicts with an active gesture or rename. The session is unchanged in
/// that case.
pub fn reduce_desktop(
    session: &mut DesktopSession,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::SetViewport { size } => session.set_viewport(size),
        DesktopAction::SetRenderedIconBounds { bounds } => {
            session.rendered_icon_bounds = Some(bounds);
        }
        DesktopAction::PointerDown {
            target,
            pointer,
            at_ms,
        } => pointer_down(session, target, pointer, at_ms, &mut effects)?,
        DesktopAction::PointerMove { pointer } => pointer_move(session, pointer),
        DesktopAction::PointerUp { pointer, at_ms } => {
            pointer_move(session, pointer);
            finish_gesture(session, at_ms, true, &mut effects);
        }
        DesktopAction::PointerLeave { at_ms } => {
            finish_gesture(session, at_ms, false, &mut effects);
        }
        DesktopAction::PointerCancel => cancel_gesture(session),
        DesktopAction::IconClick { icon_id, shift } => {
            ensure_icon(session, &icon_id)?;
            if shift {
                session.icons.toggle_selected(&icon_id);
            } else {
                session.icons.select_only(&icon_id);
            }
            effects.push(RuntimeEffect::SelectionChanged(session.icons.selected_ids()));
        }
        DesktopAction::IconDoubleClick { icon_id } => {
            let window_id = open_icon(session, &icon_id)?;
            session.start_menu_open = false;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::BackgroundClick => {
            if std::mem::take(&mut session.interaction.swallow_background_click) {
                return Ok(effects);
            }
            if matches!(session.interaction.gesture, Some(ActiveGesture::RubberBand)) {
                session.interaction.gesture = None;
            }
            session.selection.cancel();
            session.start_menu_open = false;
            if session.icons.clear_selection() {
                effects.push(RuntimeEffect::SelectionChanged(Vec::new()));
            }
        }
        DesktopAction::OpenWindow(request) => {
            let window_id = request.id.clone();
            session.windows.open(request);
            session.start_menu_open = false;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::FocusWindow { window_id } => {
            if !session.windows.focus(&window_id) {
                return Err(ReducerError::WindowNotFound(window_id));
            }
            session.start_menu_open = false;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if !session.windows.close(&window_id) {
                return Err(ReducerError::WindowNotFound(window_id));
            }
            if gesture_window(session) == Some(&window_id) {
                session.interaction.gesture = None;
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            if !session.windows.minimize(&window_id) {
                return Err(ReducerError::WindowNotFound(window_id));
            }
        }
        DesktopAction::UpdateWindow { window_id, patch } => {
            if !session.windows.update(&window_id, patch) {
                return Err(ReducerError::WindowNotFound(window_id));
            }
        }
        DesktopAction::TaskbarActivate { window_id } => {
            if !session.windows.toggle_activate(&window_id) {
                return Err(ReducerError::WindowNotFound(window_id));
            }
            session.start_menu_open = false;
            if session.windows.focused_window_id() == Some(&window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::OpenContextMenu { target, at } => {
            let entries = match &target {
                Some(icon_id) => context_menu_entries(Some(ensure_icon(session, icon_id)?)),
                None => context_menu_entries(None),
            };
            session.start_menu_open = false;
            effects.push(RuntimeEffect::ShowContextMenu {
                target,
                at,
                entries,
            });
        }
        DesktopAction::RunContextCommand { command, target } => {
            run_context_command(session, command, target, &mut effects)?;
        }
        DesktopAction::BeginRename { icon_id } => {
            ensure_icon(session, &icon_id)?;
            if session.interaction.gesture.is_some() {
                return Err(ReducerError::GestureInProgress);
            }
            session.icons.begin_rename(&icon_id);
            effects.push(RuntimeEffect::FocusRenameInput(icon_id));
        }
        DesktopAction::CommitRename { icon_id, title } => {
            ensure_icon(session, &icon_id)?;
            match session.icons.editing() {
                Some(editing) if *editing == icon_id => {
                    session.icons.commit_rename(&icon_id, &title);
                }
                Some(editing) => return Err(ReducerError::RenameInProgress(editing.clone())),
                None => {}
            }
        }
        DesktopAction::CancelRename => {
            session.icons.cancel_rename();
        }
        DesktopAction::KeyDown { command } => key_down(session, command, &mut effects)?,
        DesktopAction::ToggleStartMenu => {
            session.start_menu_open = !session.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            session.start_menu_open = false;
        }
        DesktopAction::LaunchApp { app_id } => {
            let request = apps::open_request_for_app(&app_id, session.icons.icons())
                .ok_or(ReducerError::UnknownApp(app_id))?;
            let window_id = request.id.clone();
            session.windows.open(request);
            session.start_menu_open = false;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
    }
    Ok(effects)
}

/// Context-menu commands offered for `target`, or for the background when `None`.
///
/// Every icon can be opened; only file and folder icons can be renamed, duplicated, or deleted.
pub fn context_menu_entries(target: Option<&IconRecord>) -> Vec<ContextMenuEntry> {
    let entry = |command, enabled| ContextMenuEntry { command, enabled };
    match target {
        None => vec![
            entry(ContextMenuCommand::NewFile, true),
            entry(ContextMenuCommand::NewFolder, true),
        ],
        Some(icon) => {
            let mutable = icon.kind.is_user_mutable();
            vec![
                entry(ContextMenuCommand::Open, true),
                entry(ContextMenuCommand::Rename, mutable),
                entry(ContextMenuCommand::Duplicate, mutable),
                entry(ContextMenuCommand::Delete, mutable),
            ]
        }
    }
}

fn pointer_down(
    session: &mut DesktopSession,
    target: PointerTarget,
    pointer: Point,
    at_ms: u64,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if session.interaction.gesture.is_some() {
        return Err(ReducerError::GestureInProgress);
    }

    let gesture = match target {
        PointerTarget::Background => {
            session.selection.begin(pointer, at_ms);
            effects.push(RuntimeEffect::DismissContextMenu);
            Some(ActiveGesture::RubberBand)
        }
        PointerTarget::Icon(icon_id) => {
            ensure_icon(session, &icon_id)?;
            if session.icons.is_editing(&icon_id) {
                return Err(ReducerError::RenameInProgress(icon_id));
            }
            session.icons.begin_drag(&icon_id);
            effects.push(RuntimeEffect::DismissContextMenu);
            Some(ActiveGesture::IconDrag {
                pointer_start: pointer,
            })
        }
        PointerTarget::Window { window_id, part } => {
            let rect_start = session
                .windows
                .get(&window_id)
                .map(|window| window.rect)
                .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))?;
            session.windows.focus(&window_id);
            effects.push(RuntimeEffect::FocusWindowInput(window_id.clone()));
            match part {
                ChromePart::TitleBar => Some(ActiveGesture::WindowMove(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start,
                })),
                ChromePart::Resize(edge) => Some(ActiveGesture::WindowResize(ResizeSession {
                    window_id,
                    edge,
                    pointer_start: pointer,
                    rect_start,
                })),
                ChromePart::Body => None,
            }
        }
    };

    session.start_menu_open = false;
    session.interaction.swallow_background_click = false;
    session.interaction.last_pointer = Some(pointer);
    session.interaction.gesture = gesture;
    Ok(())
}

fn pointer_move(session: &mut DesktopSession, pointer: Point) {
    session.interaction.last_pointer = Some(pointer);
    let (min_width, min_height) = (session.config.window.min_width, session.config.window.min_height);

    match &session.interaction.gesture {
        Some(ActiveGesture::RubberBand) => {
            let targets = session.selection_targets();
            session.selection.update(pointer, &targets);
        }
        Some(ActiveGesture::IconDrag { pointer_start }) => {
            session.icons.drag(pointer.delta_from(*pointer_start));
        }
        Some(ActiveGesture::WindowMove(drag)) => {
            let delta = pointer.delta_from(drag.pointer_start);
            let patch = WindowPatch {
                position: Some(drag.rect_start.offset(delta.x, delta.y).origin()),
                ..WindowPatch::default()
            };
            session.windows.update(&drag.window_id, patch);
        }
        Some(ActiveGesture::WindowResize(resize)) => {
            let delta = pointer.delta_from(resize.pointer_start);
            let rect = resize_rect(resize.rect_start, resize.edge, delta, min_width, min_height);
            let patch = WindowPatch {
                position: Some(rect.origin()),
                size: Some(rect.size()),
                ..WindowPatch::default()
            };
            session.windows.update(&resize.window_id, patch);
        }
        None => {}
    }
}

fn finish_gesture(
    session: &mut DesktopSession,
    at_ms: u64,
    released: bool,
    effects: &mut Vec<RuntimeEffect>,
) {
    match session.interaction.gesture.take() {
        Some(ActiveGesture::RubberBand) => {
            if let Some(members) = session.selection.finish(at_ms) {
                session.icons.set_selection(members);
                effects.push(RuntimeEffect::SelectionChanged(session.icons.selected_ids()));
            }
            // the click that trails a release must not clear what was just committed
            session.interaction.swallow_background_click = released;
        }
        Some(ActiveGesture::IconDrag { .. }) => {
            if !session.icons.end_drag().is_empty() {
                session.rendered_icon_bounds = None;
            }
        }
        Some(ActiveGesture::WindowMove(_)) | Some(ActiveGesture::WindowResize(_)) | None => {}
    }
}

fn cancel_gesture(session: &mut DesktopSession) {
    match session.interaction.gesture.take() {
        Some(ActiveGesture::RubberBand) => {
            session.selection.cancel();
        }
        Some(ActiveGesture::IconDrag { .. }) => {
            session.icons.cancel_drag();
        }
        Some(ActiveGesture::WindowMove(DragSession {
            window_id,
            rect_start,
            ..
        }))
        | Some(ActiveGesture::WindowResize(ResizeSession {
            window_id,
            rect_start,
            ..
        })) => {
            let patch = WindowPatch {
                position: Some(rect_start.origin()),
                size: Some(rect_start.size()),
                ..WindowPatch::default()
            };
            session.windows.update(&window_id, patch);
        }
        None => {}
    }
}

fn run_context_command(
    session: &mut DesktopSession,
    command: ContextMenuCommand,
    target: Option<IconId>,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    match command {
        ContextMenuCommand::NewFile => {
            if let Some(icon_id) = session.icons.create(IconKind::File) {
                session.rendered_icon_bounds = None;
                let window_id = open_icon(session, &icon_id)?;
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        ContextMenuCommand::NewFolder => {
            if session.icons.create(IconKind::Folder).is_some() {
                session.rendered_icon_bounds = None;
            }
        }
        ContextMenuCommand::Open => {
            let icon_id = require_target(target)?;
            let window_id = open_icon(session, &icon_id)?;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        ContextMenuCommand::Rename => {
            let icon_id = require_mutable_target(session, target)?;
            if session.interaction.gesture.is_some() {
                return Err(ReducerError::GestureInProgress);
            }
            session.icons.begin_rename(&icon_id);
            effects.push(RuntimeEffect::FocusRenameInput(icon_id));
        }
        ContextMenuCommand::Duplicate => {
            let icon_id = require_mutable_target(session, target)?;
            if session.icons.duplicate(&icon_id).is_some() {
                session.rendered_icon_bounds = None;
            }
        }
        ContextMenuCommand::Delete => {
            let icon_id = require_mutable_target(session, target)?;
            let was_selected = session.icons.is_selected(&icon_id);
            session.icons.remove(&icon_id);
            session.rendered_icon_bounds = None;
            if was_selected {
                effects.push(RuntimeEffect::SelectionChanged(session.icons.selected_ids()));
            }
        }
    }
    effects.push(RuntimeEffect::DismissContextMenu);
    Ok(())
}

fn key_down(
    session: &mut DesktopSession,
    command: KeyCommand,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    if command != KeyCommand::Escape {
        if let Some(editing) = session.icons.editing() {
            return Err(ReducerError::RenameInProgress(editing.clone()));
        }
    }

    match command {
        KeyCommand::Delete => {
            let selected = session.icons.selected_ids();
            let removable: Vec<IconId> = selected
                .iter()
                .filter(|id| {
                    session
                        .icons
                        .get(id)
                        .is_some_and(|icon| icon.kind.is_user_mutable())
                })
                .cloned()
                .collect();
            if removable.is_empty() {
                return match selected.into_iter().next() {
                    Some(locked) => Err(ReducerError::IconLocked(locked)),
                    None => Ok(()),
                };
            }
            for icon_id in &removable {
                session.icons.remove(icon_id);
            }
            session.rendered_icon_bounds = None;
            effects.push(RuntimeEffect::SelectionChanged(session.icons.selected_ids()));
        }
        KeyCommand::Rename => {
            let selected = session.icons.selected_ids();
            let [icon_id] = selected.as_slice() else {
                return Ok(());
            };
            let icon_id = require_mutable_target(session, Some(icon_id.clone()))?;
            if session.interaction.gesture.is_some() {
                return Err(ReducerError::GestureInProgress);
            }
            session.icons.begin_rename(&icon_id);
            effects.push(RuntimeEffect::FocusRenameInput(icon_id));
        }
        KeyCommand::Open => {
            let mut last_opened = None;
            for icon_id in session.icons.selected_ids() {
                last_opened = Some(open_icon(session, &icon_id)?);
            }
            if let Some(window_id) = last_opened {
                session.start_menu_open = false;
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        KeyCommand::Escape => {
            cancel_gesture(session);
            session.icons.cancel_rename();
            session.start_menu_open = false;
            effects.push(RuntimeEffect::DismissContextMenu);
        }
    }
    Ok(())
}

fn ensure_icon<'a>(
    session: &'a DesktopSession,
    icon_id: &IconId,
) -> Result<&'a IconRecord, ReducerError> {
    session
        .icons
        .get(icon_id)
        .ok_or_else(|| ReducerError::IconNotFound(icon_id.clone()))
}

fn require_target(target: Option<IconId>) -> Result<IconId, ReducerError> {
    target.ok_or_else(|| ReducerError::IconNotFound(IconId::new("")))
}

fn require_mutable_target(
    session: &DesktopSession,
    target: Option<IconId>,
) -> Result<IconId, ReducerError> {
    let icon_id = require_target(target)?;
    if ensure_icon(session, &icon_id)?.kind.is_user_mutable() {
        Ok(icon_id)
    } else {
        Err(ReducerError::IconLocked(icon_id))
    }
}

fn open_icon(session: &mut DesktopSession, icon_id: &IconId) -> Result<WindowId, ReducerError> {
    let icon = ensure_icon(session, icon_id)?;
    if session.icons.is_editing(icon_id) {
        return Err(ReducerError::RenameInProgress(icon_id.clone()));
    }
    let request = apps::open_request_for_icon(icon, session.icons.icons());
    let window_id = request.id.clone();
    session.windows.open(request);
    Ok(window_id)
}

fn gesture_window(session: &DesktopSession) -> Option<&WindowId> {
    match session.interaction.gesture.as_ref()? {
        ActiveGesture::WindowMove(drag) => Some(&drag.window_id),
        ActiveGesture::WindowResize(resize) => Some(&resize.window_id),
        ActiveGesture::RubberBand | ActiveGesture::IconDrag { .. } => None,
    }
}

/// Moves the dragged edges of `start` by `delta`, then applies the minimum size while the edges
/// opposite the handle stay put.
fn resize_rect(start: Rect, edge: ResizeEdge, delta: Point, min_w: i32, min_h: i32) -> Rect {
    let (horizontal, vertical) = (edge.horizontal(), edge.vertical());
    let grown = Rect {
        w: start.w + horizontal * delta.x,
        h: start.h + vertical * delta.y,
        ..start
    }
    .clamped_min(min_w, min_h);
    Rect {
        x: if horizontal < 0 { start.right() - grown.w } else { start.x },
        y: if vertical < 0 { start.bottom() - grown.h } else { start.y },
        ..grown
    }
}
