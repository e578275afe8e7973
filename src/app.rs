//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::wave::WavePage;
use crate::state::wallet::WalletState;

/// Root application component.
///
/// Provides the wallet state context and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let wallet = RwSignal::new(WalletState::default());
    provide_context(wallet);

    view! {
        <Stylesheet id="wave-portal" href="/pkg/wave-portal.css"/>
        <Title text="Wave Portal"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=WavePage/>
            </Routes>
        </Router>
    }
}
