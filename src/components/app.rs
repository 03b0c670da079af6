use super::{settings_modal::SettingsModal, sketch_pad::SketchPad};
use crate::model::DrawConfig;
use yew::prelude::*;

const CONFIG_KEY: &str = "hw_config";

fn load_config() -> Option<DrawConfig> {
    let store = web_sys::window()?.local_storage().ok()??;
    let raw = store.get_item(CONFIG_KEY).ok()??;
    match DrawConfig::from_json(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring stored config");
            None
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(|| load_config().unwrap_or_default());
    let open_settings = use_state(|| false);

    // Persist config changes
    {
        let config = config.clone();
        use_effect_with((*config).clone(), move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    match config.to_json() {
                        Ok(s) => {
                            let _ = store.set_item(CONFIG_KEY, &s);
                        }
                        Err(e) => tracing::warn!(error = %e, "failed to persist config"),
                    }
                }
            }
            || ()
        });
    }

    let show_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_| open_settings.set(true))
    };
    let close_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_| open_settings.set(false))
    };
    let apply = {
        let config = config.clone();
        let open_settings = open_settings.clone();
        Callback::from(move |next: DrawConfig| {
            config.set(next);
            open_settings.set(false);
        })
    };
    let reset = {
        let config = config.clone();
        let open_settings = open_settings.clone();
        Callback::from(move |_| {
            config.set(DrawConfig::default());
            open_settings.set(false);
        })
    };

    html! {
        <div id="root">
            <SketchPad config={(*config).clone()} on_open_settings={show_settings} />
            <SettingsModal
                show={*open_settings}
                config={(*config).clone()}
                on_close={close_settings}
                on_apply={apply}
                on_reset={reset}
            />
        </div>
    }
}
