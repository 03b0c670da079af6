use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::export::ImageFormat;
use crate::model::Mode;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub mode: Mode,
    pub format: ImageFormat,
    pub on_clear: Callback<()>,
    pub on_mode: Callback<Mode>,
    pub on_format: Callback<ImageFormat>,
    pub on_download: Callback<()>,
    pub on_open_settings: Callback<()>,
    pub feedback: Option<String>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let clear_cb = {
        let cb = props.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let hand_cb = {
        let cb = props.on_mode.clone();
        Callback::from(move |_| cb.emit(Mode::Handwriting))
    };
    let linear_cb = {
        let cb = props.on_mode.clone();
        Callback::from(move |_| cb.emit(Mode::Linear))
    };
    let download_cb = {
        let cb = props.on_download.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let format_cb = {
        let cb = props.on_format.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(format) = select.value().parse::<ImageFormat>() {
                cb.emit(format);
            }
        })
    };
    let active = |mode: Mode| {
        if props.mode == mode {
            "font-weight:600; border:1px solid #58a6ff;"
        } else {
            ""
        }
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:180px; display:flex; flex-direction:column; gap:6px;">
        <button onclick={clear_cb}>{"Rewrite"}</button>
        <button onclick={hand_cb} style={active(Mode::Handwriting)}>{"Hand-writing"}</button>
        <button onclick={linear_cb} style={active(Mode::Linear)}>{"Linear"}</button>
        <div style="display:flex; gap:6px;">
            <select onchange={format_cb} style="flex:1;">
                { for ImageFormat::ALL.iter().map(|f| html! {
                    <option value={f.extension()} selected={*f == props.format}>{ f.extension().to_uppercase() }</option>
                }) }
            </select>
            <button onclick={download_cb}>{"Download"}</button>
        </div>
        <button onclick={settings_cb}>{"Settings"}</button>
        { if let Some(txt) = &props.feedback { html!{ <div style="font-size:11px; line-height:1.2; background:#1c2128; border:1px solid #30363d; padding:4px 6px; border-radius:6px;">{ txt.clone() }</div> } } else { html!{} } }
    </div>}
}
