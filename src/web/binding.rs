use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, MouseEvent, TouchEvent, TouchList, Window};

use super::canvas::CanvasSurface;
use super::js_error;
use crate::error::{Error, Result};
use crate::input::{Capabilities, ClientPos, RawInput};
use crate::widget::HandWrite;

pub type SharedWidget = Rc<RefCell<HandWrite<CanvasSurface>>>;

/// Touch support as reported by the browser, checked once per widget.
pub fn detect_capabilities() -> Capabilities {
    let supports_touch_events = web_sys::window()
        .map(|w| {
            js_sys::Reflect::has(&w, &JsValue::from_str("ontouchstart")).unwrap_or(false)
                || w.navigator().max_touch_points() > 0
        })
        .unwrap_or(false);
    Capabilities {
        supports_touch_events,
    }
}

fn mouse_input(e: &MouseEvent) -> RawInput {
    RawInput::mouse(e.client_x() as f64, e.client_y() as f64)
}

fn positions(list: &TouchList) -> Vec<ClientPos> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| ClientPos::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn touch_input(e: &TouchEvent) -> RawInput {
    RawInput::Touch {
        touches: positions(&e.touches()),
        changed: positions(&e.changed_touches()),
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

fn listen<E: JsCast + 'static>(
    target: &EventTarget,
    event: &'static str,
    mut handler: impl FnMut(&E, &Event) + 'static,
) -> Result<Listener> {
    let callback = Closure::wrap(Box::new(move |e: Event| {
        if let Some(typed) = e.dyn_ref::<E>() {
            handler(typed, &e);
        }
    }) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(js_error)?;
    Ok(Listener {
        target: target.clone(),
        event,
        callback,
    })
}

/// At most one outstanding `requestAnimationFrame` for move samples.
struct FrameScheduler {
    window: Window,
    id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameScheduler {
    /// Returns `false` when no frame could be scheduled.
    fn request(&self) -> bool {
        if self.is_pending() {
            return true;
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return false;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => {
                self.id.set(Some(id));
                true
            }
            Err(e) => {
                warn!(error = ?e, "requestAnimationFrame failed");
                false
            }
        }
    }

    fn is_pending(&self) -> bool {
        self.id.get().is_some()
    }

    fn cancel(&self) {
        if let Some(id) = self.id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

/// Subscribes a widget to its canvas' pointer or touch events. Dropping the
/// binding (or calling [`Binding::destroy`]) unsubscribes everything.
pub struct Binding {
    widget: SharedWidget,
    listeners: Vec<Listener>,
    frames: Rc<FrameScheduler>,
}

impl Binding {
    pub fn bind(widget: SharedWidget) -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| Error::Canvas("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Canvas("no document".to_string()))?;
        let (canvas, capabilities) = {
            let w = widget.borrow();
            let canvas: EventTarget = w.surface().canvas().clone().into();
            (canvas, w.capabilities())
        };

        let frames = Rc::new(FrameScheduler {
            window,
            id: Cell::new(None),
            callback: RefCell::new(None),
        });
        {
            let widget = widget.clone();
            let frames_cb = Rc::downgrade(&frames);
            *frames.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let Some(frames) = frames_cb.upgrade() else {
                    return;
                };
                frames.id.set(None);
                match widget.try_borrow_mut() {
                    Ok(mut w) => {
                        w.on_frame();
                    }
                    // The sample stays queued; the next move reschedules it.
                    Err(_) => warn!("widget busy during frame"),
                }
            }) as Box<dyn FnMut()>));
        }

        let start = {
            let widget = widget.clone();
            move |input: RawInput, event: &Event| {
                if let Ok(mut w) = widget.try_borrow_mut() {
                    event.prevent_default();
                    w.pointer_start(&input);
                }
            }
        };
        let moved = {
            let widget = widget.clone();
            let frames = frames.clone();
            move |input: RawInput, event: &Event| {
                if let Ok(mut w) = widget.try_borrow_mut() {
                    if !w.is_drawing() {
                        return;
                    }
                    event.prevent_default();
                    // A queued sample without an outstanding frame means an
                    // earlier frame was lost.
                    let queued = w.pointer_move(input);
                    if (queued || (w.has_pending_frame() && !frames.is_pending()))
                        && !frames.request()
                    {
                        w.on_frame();
                    }
                }
            }
        };
        let end = {
            let widget = widget.clone();
            let frames = frames.clone();
            move |input: RawInput, event: &Event| {
                frames.cancel();
                if let Ok(mut w) = widget.try_borrow_mut() {
                    if w.is_drawing() {
                        event.prevent_default();
                    }
                    w.pointer_end(&input);
                }
            }
        };

        let document: EventTarget = document.into();
        let mut listeners = Vec::new();
        if capabilities.supports_touch_events {
            let end_cancel = end.clone();
            listeners.push(listen(&canvas, "touchstart", move |e: &TouchEvent, event: &Event| {
                start(touch_input(e), event)
            })?);
            listeners.push(listen(&canvas, "touchmove", move |e: &TouchEvent, event: &Event| {
                moved(touch_input(e), event)
            })?);
            listeners.push(listen(&document, "touchend", move |e: &TouchEvent, event: &Event| {
                end(touch_input(e), event)
            })?);
            listeners.push(listen(&document, "touchcancel", move |e: &TouchEvent, event: &Event| {
                end_cancel(touch_input(e), event)
            })?);
        } else {
            let end_leave = end.clone();
            listeners.push(listen(&canvas, "mousedown", move |e: &MouseEvent, event: &Event| {
                start(mouse_input(e), event)
            })?);
            listeners.push(listen(&canvas, "mousemove", move |e: &MouseEvent, event: &Event| {
                moved(mouse_input(e), event)
            })?);
            listeners.push(listen(&document, "mouseup", move |e: &MouseEvent, event: &Event| {
                end(mouse_input(e), event)
            })?);
            listeners.push(listen(&canvas, "mouseleave", move |e: &MouseEvent, event: &Event| {
                end_leave(mouse_input(e), event)
            })?);
        }

        Ok(Self {
            widget,
            listeners,
            frames,
        })
    }

    pub fn widget(&self) -> &SharedWidget {
        &self.widget
    }

    /// Removes every listener and stops the widget. Idempotent.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        self.frames.cancel();
        if let Ok(mut w) = self.widget.try_borrow_mut() {
            w.destroy();
        }
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.destroy();
        self.frames.callback.borrow_mut().take();
    }
}
