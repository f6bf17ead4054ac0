use yew::prelude::*;

use crate::config;
use crate::counter::{format_value, use_animated_counter, CounterOptions};

#[derive(Properties, PartialEq)]
pub struct AnimatedStatProps {
    pub label: String,
    pub value: f64,
    #[prop_or_default]
    pub prefix: String,
    #[prop_or_default]
    pub suffix: String,
    #[prop_or_default]
    pub decimals: u32,
    #[prop_or(config::COUNTER_DURATION_MS)]
    pub duration_ms: f64,
}

#[function_component(AnimatedStat)]
pub fn animated_stat(props: &AnimatedStatProps) -> Html {
    let node = use_node_ref();
    let options = CounterOptions {
        duration_ms: props.duration_ms,
        decimals: props.decimals,
        ..Default::default()
    };
    let counter = use_animated_counter(node.clone(), props.value, options);

    html! {
        <div ref={node} class={classes!("stat", counter.is_animating.then(|| "counting"))}>
            <span class="stat-value">
                {&props.prefix}
                {format_value(counter.value, props.decimals)}
                {&props.suffix}
            </span>
            <span class="stat-label">{&props.label}</span>
        </div>
    }
}
