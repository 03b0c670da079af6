use std::cell::RefCell;
use std::rc::Rc;

use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::controls_panel::ControlsPanel;
use crate::error::{Error, Result};
use crate::export::ImageFormat;
use crate::model::{DrawConfig, Mode};
use crate::web::{AnchorDownload, Binding, CanvasSurface, detect_capabilities};
use crate::widget::{HandWrite, StrokeHooks};

#[derive(Properties, PartialEq, Clone)]
pub struct SketchPadProps {
    pub config: DrawConfig,
    pub on_open_settings: Callback<()>,
}

fn mount(canvas: Option<HtmlCanvasElement>, config: DrawConfig) -> Result<Binding> {
    let canvas = canvas.ok_or_else(|| Error::Canvas("canvas not attached".to_string()))?;
    let surface = CanvasSurface::attach(canvas)?;
    let hooks = StrokeHooks::default()
        .before_stroke(|_, p| tracing::trace!(x = p.x, y = p.y, "before stroke"))
        .after_stroke(|_, p| tracing::trace!(x = p.x, y = p.y, "after stroke"));
    let widget = HandWrite::new(surface, config, detect_capabilities())?.with_hooks(hooks);
    Binding::bind(Rc::new(RefCell::new(widget)))
}

fn with_widget<T>(
    binding: &Rc<RefCell<Option<Binding>>>,
    f: impl FnOnce(&mut HandWrite<CanvasSurface>) -> T,
) -> Option<T> {
    let binding = binding.borrow();
    let widget = binding.as_ref()?.widget().clone();
    let mut w = widget.try_borrow_mut().ok()?;
    Some(f(&mut *w))
}

#[function_component(SketchPad)]
pub fn sketch_pad(props: &SketchPadProps) -> Html {
    let canvas_ref = use_node_ref();
    let binding = use_mut_ref(|| None::<Binding>);
    let mode = use_state(|| props.config.mode);
    let format = use_state(|| ImageFormat::Png);
    let feedback = use_state(|| None::<String>);

    // (Re)build the widget whenever the resolved config changes.
    {
        let canvas_ref = canvas_ref.clone();
        let binding = binding.clone();
        let mode = mode.clone();
        let feedback = feedback.clone();
        use_effect_with(props.config.clone(), move |config| {
            match mount(canvas_ref.cast::<HtmlCanvasElement>(), config.clone()) {
                Ok(b) => {
                    mode.set(config.mode);
                    *binding.borrow_mut() = Some(b);
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to mount canvas");
                    feedback.set(Some(e.to_string()));
                }
            }
            move || {
                if let Some(mut b) = binding.borrow_mut().take() {
                    b.destroy();
                }
            }
        });
    }

    let on_clear = {
        let binding = binding.clone();
        let feedback = feedback.clone();
        Callback::from(move |_| {
            with_widget(&binding, |w| w.clear());
            feedback.set(None);
        })
    };
    let on_mode = {
        let binding = binding.clone();
        let mode = mode.clone();
        Callback::from(move |next: Mode| {
            with_widget(&binding, |w| w.set_mode(next));
            mode.set(next);
        })
    };
    let on_format = {
        let format = format.clone();
        Callback::from(move |next: ImageFormat| format.set(next))
    };
    let on_download = {
        let binding = binding.clone();
        let format = format.clone();
        let feedback = feedback.clone();
        Callback::from(move |_| {
            let result = with_widget(&binding, |w| {
                w.trigger_download(format.extension(), &mut AnchorDownload)
            });
            if let Some(Err(e)) = result {
                tracing::warn!(error = %e, "download failed");
                feedback.set(Some(e.to_string()));
            }
        })
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh;">
            <canvas ref={canvas_ref} style="display:block; width:100%; height:100%; touch-action:none; cursor:crosshair;" />
            <ControlsPanel
                mode={*mode}
                format={*format}
                on_clear={on_clear}
                on_mode={on_mode}
                on_format={on_format}
                on_download={on_download}
                on_open_settings={props.on_open_settings.clone()}
                feedback={(*feedback).clone()}
            />
        </div>
    }
}
