use stylist::css;
use yew::prelude::*;

use crate::counter::{use_animated_counter, CounterOptions};
use crate::scroll::{use_scroll, ScrollOptions};

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub label: String,
    /// Fill level, 0 to 100.
    pub percent: f64,
}

/// Labelled bar that fills up once, the first time it is scrolled into view.
#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let node = use_node_ref();
    let fill = use_animated_counter(node.clone(), props.percent.clamp(0.0, 100.0), CounterOptions::default());

    let style = css!(
        r#"
        margin: 1rem 0;

        .progress-track {
            height: 8px;
            border-radius: 4px;
            background: rgba(255, 255, 255, 0.1);
            overflow: hidden;
        }

        .progress-fill {
            height: 100%;
            background: linear-gradient(90deg, #1E90FF, #7EB2FF);
        }

        .progress-head {
            display: flex;
            justify-content: space-between;
            margin-bottom: 0.4rem;
            font-size: 0.9rem;
        }
        "#
    );

    html! {
        <div ref={node} class={style}>
            <div class="progress-head">
                <span>{&props.label}</span>
                <span>{format!("{}%", fill.value)}</span>
            </div>
            <div class="progress-track">
                <div class="progress-fill" style={format!("width: {}%;", fill.value)}></div>
            </div>
        </div>
    }
}

/// Thin bar pinned to the top of the page showing how far it is scrolled.
#[function_component(ScrollProgress)]
pub fn scroll_progress() -> Html {
    let scroll = use_scroll(ScrollOptions::default(), None, None);

    let style = css!(
        r#"
        position: fixed;
        top: 0;
        left: 0;
        height: 3px;
        z-index: 1001;
        background: #1E90FF;
        transition: opacity 0.4s ease;

        &.idle {
            opacity: 0.4;
        }
        "#
    );

    html! {
        <div
            class={classes!(style, (!scroll.is_scrolling).then(|| "idle"))}
            style={format!("width: {:.2}%;", scroll.percentage)}
        ></div>
    }
}
