//! Runtime provider and context wiring for one desktop session.
//!
//! The provider owns the session for as long as it is mounted, republishes its snapshot after
//! every state-changing action, and queues runtime effects for the renderer to drain.
#![allow(clippy::clone_on_copy)]

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, Node};

use crate::{
    config::DesktopConfig,
    input,
    model::DesktopSnapshot,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    session::DesktopSession,
    window_manager::Placement,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// The session this provider owns.
    pub session: StoredValue<DesktopSession>,
    /// Latest immutable snapshot; only set when it actually changed.
    pub snapshot: RwSignal<DesktopSnapshot>,
    /// Queue of runtime effects emitted by the reducer and drained by the renderer.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
    /// Desktop container element, registered by the renderer once mounted.
    pub surface: StoredValue<Option<Element>>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Takes every queued effect, oldest first.
    pub fn drain_effects(&self) -> Vec<RuntimeEffect> {
        let mut drained = Vec::new();
        if !self.effects.with_untracked(Vec::is_empty) {
            self.effects.update(|queue| std::mem::swap(queue, &mut drained));
        }
        drained
    }

    /// Registers the element that hosts the desktop so releases inside it are left to its own
    /// pointer-up handler.
    pub fn set_surface(&self, element: Option<Element>) {
        self.surface.set_value(element);
    }

    /// Whether a pointer gesture is active.
    pub fn gesture_active(&self) -> bool {
        self.session
            .try_with_value(|session| session.interaction().gesture.is_some())
            .unwrap_or(false)
    }
}

fn apply_action(
    session: StoredValue<DesktopSession>,
    snapshot: RwSignal<DesktopSnapshot>,
    effects: RwSignal<Vec<RuntimeEffect>>,
    action: DesktopAction,
) {
    let outcome = session.try_update_value(|desktop| {
        reduce_desktop(desktop, action).map(|new_effects| (new_effects, desktop.snapshot()))
    });

    match outcome {
        Some(Ok((new_effects, next))) => {
            if snapshot.with_untracked(|current| *current != next) {
                snapshot.set(next);
            }
            if !new_effects.is_empty() {
                effects.update(|queue| queue.extend(new_effects));
            }
        }
        Some(Err(err)) => logging::warn!("desktop reducer error: {err}"),
        None => logging::warn!("desktop session disposed; action dropped"),
    }
}

/// Whether `target` lies inside `surface`; `None` until a surface is registered. Targets that are
/// not DOM nodes, such as the window itself, count as outside.
fn released_inside(surface: Option<&Element>, target: Option<EventTarget>) -> Option<bool> {
    let surface = surface?;
    let inside = target
        .and_then(|target| target.dyn_into::<Node>().ok())
        .is_some_and(|node| surface.contains(Some(&node)));
    Some(inside)
}

fn finishes_outside_release(gesture_active: bool, released_inside: Option<bool>) -> bool {
    gesture_active && released_inside == Some(false)
}

/// Ends an active gesture when the pointer is released outside the desktop surface.
fn install_pointer_release_fallback(runtime: DesktopRuntimeContext) {
    let handle = window_event_listener(ev::pointerup, move |ev| {
        let inside = runtime
            .surface
            .try_with_value(|surface| released_inside(surface.as_ref(), ev.target()))
            .flatten();
        if finishes_outside_release(runtime.gesture_active(), inside) {
            runtime.dispatch_action(input::pointer_leave_action());
        }
    });
    on_cleanup(move || handle.remove());
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components for one desktop session.
pub fn DesktopProvider(
    /// Session tunables; defaults apply when omitted.
    #[prop(optional)]
    config: Option<DesktopConfig>,
    children: Children,
) -> impl IntoView {
    let session = store_value(DesktopSession::new(
        config.unwrap_or_default(),
        Placement::random(),
    ));
    let snapshot = create_rw_signal(session.with_value(DesktopSession::snapshot));
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        apply_action(session, snapshot, effects, action);
    });

    let runtime = DesktopRuntimeContext {
        session,
        snapshot,
        effects,
        dispatch,
        surface: store_value(None),
    };

    provide_context(runtime.clone());
    install_pointer_release_fallback(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
