use stylist::css;
use yew::prelude::*;

use crate::visibility::{use_in_viewport, VisibilityOptions};

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
}

/// Fades its children in the first time they scroll into view and leaves
/// them visible from then on.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let visibility = use_in_viewport(node.clone(), VisibilityOptions::default());

    let style = css!(
        r#"
        opacity: 0;
        transform: translateY(24px);
        transition: opacity 0.6s ease-out, transform 0.6s ease-out;

        &.revealed {
            opacity: 1;
            transform: none;
        }
        "#
    );

    html! {
        <div
            ref={node}
            class={classes!(style, props.class.clone(), visibility.has_been_visible.then(|| "revealed"))}
        >
            { for props.children.iter() }
        </div>
    }
}
