use crate::level::{LevelCompletionResult, Outcome};
use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ResultOverlayProps {
    pub result: Option<LevelCompletionResult>,
    pub next_level_id: Option<String>,
    pub retry: Callback<()>,
    pub to_next: Callback<String>,
}

fn star_row(stars: u8) -> String {
    (1..=4u8).map(|i| if i <= stars { '★' } else { '☆' }).collect()
}

#[function_component]
pub fn ResultOverlay(props: &ResultOverlayProps) -> Html {
    let Some(result) = props.result else {
        return html! {};
    };
    let won = result.outcome == Outcome::Win;
    let accent = if won { "#2ea043" } else { "#f85149" };
    let retry_btn = {
        let cb = props.retry.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let next_btn = props.next_level_id.clone().map(|id| {
        let cb = props.to_next.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    });
    html! {
        <div style={format!("position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid {}; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px; z-index:40;", accent)}>
            <h2 style={format!("margin:0 0 12px 0; color:{};", accent)}>{ if won { "Goal Reached!" } else { "Not Quite" } }</h2>
            <p style="margin:4px 0; font-size:28px; color:#d4af37; letter-spacing:4px;">{ star_row(result.stars) }</p>
            <p style="margin:4px 0;">{ format!("Score: {}", result.metrics.score) }</p>
            <p style="margin:4px 0;">{ format!("Moves: {}", result.metrics.moves) }</p>
            <p style="margin:4px 0;">{ format!("Time: {}", format_time(result.metrics.time_ms)) }</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={retry_btn}>{"Try Again"}</button>
                { if let Some(cb) = next_btn { html!{ <button onclick={cb}>{"Next Level"}</button> } } else { html!{} } }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_fill_from_the_left() {
        assert_eq!(star_row(1), "★☆☆☆");
        assert_eq!(star_row(4), "★★★★");
    }
}
