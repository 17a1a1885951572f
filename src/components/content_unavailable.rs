use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ContentUnavailableProps {
    pub reason: String,
}

#[function_component]
pub fn ContentUnavailable(props: &ContentUnavailableProps) -> Html {
    html! {
        <div style="margin:48px auto; max-width:420px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:20px; text-align:center;">
            <h3 style="margin:0 0 8px 0; color:#f0883e;">{"Content unavailable"}</h3>
            <div style="font-size:13px; opacity:0.8;">{ props.reason.clone() }</div>
        </div>
    }
}
