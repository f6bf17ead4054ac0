use yew::prelude::*;
use log::info;

use staymotion::components::{
    anchor_link::AnchorLink,
    animated_stat::AnimatedStat,
    progress_bar::{ProgressBar, ScrollProgress},
    reveal::Reveal,
};
use staymotion::config;
use staymotion::measure::lerp;
use staymotion::scroll::{use_scroll, ScrollOptions};
use staymotion::stats;

const SECTIONS: [(&str, &str); 4] = [
    ("about", "About"),
    ("model", "Pricing model"),
    ("portfolio", "Portfolio"),
    ("contacts", "Contacts"),
];

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let on_scroll_end = use_callback(
        |_: (), _| log::debug!("scroll settled"),
        (),
    );
    let scroll = use_scroll(ScrollOptions::default(), None, Some(on_scroll_end));
    let is_scrolled = scroll.offset > config::ANCHOR_OFFSET_PX;
    // Fade the bar background in over the height of the header
    let backdrop = lerp(0.0, 0.95, (scroll.offset / config::ANCHOR_OFFSET_PX).clamp(0.0, 1.0));

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: String| menu_open.set(false))
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav
            class={classes!("top-nav", is_scrolled.then(|| "scrolled"))}
            style={format!("background-color: rgba(26, 26, 26, {:.2});", backdrop)}
        >
            <div class="nav-content">
                <AnchorLink to="hero" class={classes!("nav-logo")}>{"staymotion"}</AnchorLink>
                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    {
                        for SECTIONS.iter().map(|(id, title)| html! {
                            <AnchorLink
                                to={id.to_string()}
                                class={classes!("nav-link")}
                                on_navigate={close_menu.clone()}
                            >
                                {*title}
                            </AnchorLink>
                        })
                    }
                </div>
            </div>
        </nav>
    }
}

#[function_component(Showcase)]
pub fn showcase() -> Html {
    let stats = use_memo(|_| stats::load_stats(), ());

    html! {
        <main class="showcase">
            <section id="hero" class="hero">
                <h1>{"Short-term rentals, fully managed"}</h1>
                <AnchorLink to="about" class={classes!("hero-cta")}>{"See how it works"}</AnchorLink>
            </section>

            <section id="about">
                <Reveal>
                    <h2>{"About"}</h2>
                </Reveal>
                <div class="stats-grid">
                    {
                        for stats.iter().map(|stat| html! {
                            <AnimatedStat
                                label={stat.label.clone()}
                                value={stat.value}
                                prefix={stat.prefix.clone()}
                                suffix={stat.suffix.clone()}
                                decimals={stat.decimals}
                            />
                        })
                    }
                </div>
            </section>

            <section id="model">
                <Reveal>
                    <h2>{"Pricing model"}</h2>
                </Reveal>
                <ProgressBar label="Owner share" percent={80.0} />
                <ProgressBar label="Management fee" percent={20.0} />
            </section>

            <section id="portfolio">
                <Reveal>
                    <h2>{"Portfolio"}</h2>
                </Reveal>
                <ProgressBar label="City apartments" percent={64.0} />
                <ProgressBar label="Country houses" percent={27.0} />
                <ProgressBar label="Serviced studios" percent={9.0} />
            </section>

            <section id="contacts">
                <Reveal>
                    <h2>{"Contacts"}</h2>
                </Reveal>
            </section>
        </main>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <>
            <ScrollProgress />
            <Nav />
            <Showcase />
        </>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
