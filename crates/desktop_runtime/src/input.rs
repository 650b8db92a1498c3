//! Browser event translation: DOM events in, [`DesktopAction`] values out.

use web_sys::{Element, KeyboardEvent, MouseEvent, PointerEvent};

use crate::{
    geometry::{to_container_relative, Point, Rect},
    model::{IconId, PointerTarget},
    reducer::{DesktopAction, KeyCommand},
};

/// Current event timestamp in unix milliseconds.
pub fn event_time_ms() -> u64 {
    platform_host::unix_time_ms_now()
}

fn element_origin(element: &Element) -> Point {
    let rect = element.get_bounding_client_rect();
    Point::new(rect.left().round() as i32, rect.top().round() as i32)
}

/// Pointer position relative to `container`, or in client coordinates when there is none.
pub fn pointer_point(ev: &MouseEvent, container: Option<&Element>) -> Point {
    let client = Point::new(ev.client_x(), ev.client_y());
    match container {
        Some(element) => to_container_relative(client, element_origin(element)),
        None => client,
    }
}

pub fn pointer_down_action(
    target: PointerTarget,
    ev: &PointerEvent,
    container: Option<&Element>,
) -> DesktopAction {
    DesktopAction::PointerDown {
        target,
        pointer: pointer_point(ev, container),
        at_ms: event_time_ms(),
    }
}

pub fn pointer_move_action(ev: &PointerEvent, container: Option<&Element>) -> DesktopAction {
    DesktopAction::PointerMove {
        pointer: pointer_point(ev, container),
    }
}

pub fn pointer_up_action(ev: &PointerEvent, container: Option<&Element>) -> DesktopAction {
    DesktopAction::PointerUp {
        pointer: pointer_point(ev, container),
        at_ms: event_time_ms(),
    }
}

pub fn pointer_leave_action() -> DesktopAction {
    DesktopAction::PointerLeave {
        at_ms: event_time_ms(),
    }
}

/// Measured icon bounds relative to `container`, for [`DesktopAction::SetRenderedIconBounds`].
pub fn measured_icon_bounds(container: &Element, icons: &[(IconId, Element)]) -> Vec<(IconId, Rect)> {
    let origin = element_origin(container);
    icons
        .iter()
        .map(|(id, element)| {
            let rect = element.get_bounding_client_rect();
            let top_left = to_container_relative(
                Point::new(rect.left().round() as i32, rect.top().round() as i32),
                origin,
            );
            (
                id.clone(),
                Rect::new(
                    top_left.x,
                    top_left.y,
                    rect.width().round() as i32,
                    rect.height().round() as i32,
                ),
            )
        })
        .collect()
}

/// Maps a `KeyboardEvent.key` value to a desktop command. Chords with ctrl/meta/alt are left to
/// the browser.
pub fn key_command(key: &str, modified: bool) -> Option<KeyCommand> {
    if modified {
        return None;
    }
    match key {
        "Delete" => Some(KeyCommand::Delete),
        "F2" => Some(KeyCommand::Rename),
        "Enter" => Some(KeyCommand::Open),
        "Escape" | "Esc" => Some(KeyCommand::Escape),
        _ => None,
    }
}

pub fn keyboard_action(ev: &KeyboardEvent) -> Option<DesktopAction> {
    let modified = ev.ctrl_key() || ev.meta_key() || ev.alt_key();
    key_command(&ev.key(), modified).map(|command| DesktopAction::KeyDown { command })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn desktop_keys_map_to_commands() {
        let cases = [
            ("Delete", Some(KeyCommand::Delete)),
            ("F2", Some(KeyCommand::Rename)),
            ("Enter", Some(KeyCommand::Open)),
            ("Escape", Some(KeyCommand::Escape)),
            ("Esc", Some(KeyCommand::Escape)),
            ("Backspace", None),
            ("a", None),
        ];
        for (key, expected) in cases {
            assert_eq!(key_command(key, false), expected, "{key}");
        }
    }

    #[test]
    fn modified_chords_are_ignored() {
        assert_eq!(key_command("Delete", true), None);
        assert_eq!(key_command("Escape", true), None);
    }
}
