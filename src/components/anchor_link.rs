use yew::prelude::*;

use crate::config;
use crate::dom;

#[derive(Properties, PartialEq)]
pub struct AnchorLinkProps {
    /// Id of the section to jump to, without the `#`.
    pub to: String,
    #[prop_or(config::ANCHOR_OFFSET_PX)]
    pub offset: f64,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_navigate: Option<Callback<String>>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(AnchorLink)]
pub fn anchor_link(props: &AnchorLinkProps) -> Html {
    let onclick = {
        let to = props.to.clone();
        let offset = props.offset;
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            // Fall back to the plain hash jump if the section isn't there
            if dom::scroll_to_anchor(&to, offset) {
                e.prevent_default();
                if let Some(on_navigate) = &on_navigate {
                    on_navigate.emit(to.clone());
                }
            }
        })
    };

    html! {
        <a href={format!("#{}", props.to)} class={props.class.clone()} {onclick}>
            { for props.children.iter() }
        </a>
    }
}
