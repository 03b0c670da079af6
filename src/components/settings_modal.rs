use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::model::{Color, DrawConfig};

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub config: DrawConfig,
    pub on_close: Callback<()>,
    pub on_apply: Callback<DrawConfig>,
    pub on_reset: Callback<()>,
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    PaintColor,
    BackgroundColor,
    MinWidth,
    MaxWidth,
    WriteSpeed,
}

fn apply_field(config: &mut DrawConfig, field: Field, raw: &str) -> Result<(), String> {
    let number = || raw.trim().parse::<f64>().map_err(|e| format!("{raw}: {e}"));
    match field {
        Field::PaintColor => config.paint_color = Color::parse(raw).map_err(|e| e.to_string())?,
        Field::BackgroundColor => {
            config.background_color = Color::parse(raw).map_err(|e| e.to_string())?
        }
        Field::MinWidth => config.min_width = number()?,
        Field::MaxWidth => config.max_width = number()?,
        Field::WriteSpeed => config.write_speed = number()?,
    }
    Ok(())
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    let draft = use_state(|| props.config.clone());
    let problem = use_state(|| None::<String>);
    {
        let draft = draft.clone();
        let problem = problem.clone();
        use_effect_with((props.config.clone(), props.show), move |(config, _)| {
            draft.set(config.clone());
            problem.set(None);
            || ()
        });
    }
    if !props.show {
        return html! {};
    }

    let edit = |field: Field| {
        let draft = draft.clone();
        let problem = problem.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            match apply_field(&mut next, field, &input.value()) {
                Ok(()) => {
                    problem.set(None);
                    draft.set(next);
                }
                Err(msg) => problem.set(Some(msg)),
            }
        })
    };
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let apply_cb = {
        let cb = props.on_apply.clone();
        let draft = draft.clone();
        let problem = problem.clone();
        Callback::from(move |_| match draft.validate() {
            Ok(()) => cb.emit((*draft).clone()),
            Err(e) => problem.set(Some(e.to_string())),
        })
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let row = "display:flex; align-items:center; justify-content:space-between; gap:8px;";
    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; max-width:420px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style={row}>
                    <span>{"Paint color"}</span>
                    <input type="text" value={draft.paint_color.css().to_string()} onchange={edit(Field::PaintColor)} />
                </label>
                <label style={row}>
                    <span>{"Background"}</span>
                    <input type="text" value={draft.background_color.css().to_string()} onchange={edit(Field::BackgroundColor)} />
                </label>
                <label style={row}>
                    <span>{"Min width"}</span>
                    <input type="number" min="0.5" step="0.5" value={draft.min_width.to_string()} onchange={edit(Field::MinWidth)} />
                </label>
                <label style={row}>
                    <span>{"Max width"}</span>
                    <input type="number" min="0.5" step="0.5" value={draft.max_width.to_string()} onchange={edit(Field::MaxWidth)} />
                </label>
                <label style={row}>
                    <span>{"Write speed"}</span>
                    <input type="number" min="1" step="1" value={draft.write_speed.to_string()} onchange={edit(Field::WriteSpeed)} />
                </label>
            </div>
            { if let Some(msg) = &*problem { html!{ <div style="font-size:12px; color:#f85149;">{ msg.clone() }</div> } } else { html!{} } }
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Restore Defaults"}</button>
                <button onclick={apply_cb} style="flex:0 0 auto;">{"Apply"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Applying new settings starts a fresh canvas."}</div>
        </div>
    </div>}
}
