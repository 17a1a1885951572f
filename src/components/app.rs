use std::rc::Rc;

use super::{editor_view::EditorView, level_view::LevelView, settings_modal::SettingsModal};
use crate::plugins::{PluginRegistry, RegistryContext};
use crate::state::{Role, Route, Session, Settings, guard, resolve_landing_route};
use crate::store::BrowserLevelStore;
use crate::util::clog;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
struct LoginViewProps {
    sign_in: Callback<Role>,
}

#[function_component]
fn LoginView(props: &LoginViewProps) -> Html {
    let as_role = |role: Role| {
        let cb = props.sign_in.clone();
        Callback::from(move |_: MouseEvent| cb.emit(role))
    };
    html! {
        <div style="margin:64px auto; max-width:360px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:20px; display:flex; flex-direction:column; gap:10px; text-align:center;">
            <h2 style="margin:0;">{"Block Maze"}</h2>
            <div style="font-size:13px; opacity:0.8;">{"Program a robot through the maze, one block at a time."}</div>
            <button onclick={as_role(Role::Student)}>{"Sign in as Student"}</button>
            <button onclick={as_role(Role::Professor)}>{"Sign in as Professor"}</button>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_state(Session::default);
    let route = use_state(|| Route::Login);
    let settings = use_state(Settings::load);
    let show_settings = use_state(|| false);
    let registry = use_memo((), |_| RegistryContext(Rc::new(PluginRegistry::builtin())));

    // Persist settings changes
    {
        let settings = settings.clone();
        use_effect_with((*settings).clone(), move |_| {
            settings.save();
            || ()
        });
    }

    let navigate = {
        let route = route.clone();
        let session = session.clone();
        Callback::from(move |next: Route| route.set(guard(next, &session)))
    };
    let sign_in = {
        let session = session.clone();
        let route = route.clone();
        Callback::from(move |role: Role| {
            let next = Session::check_auth(role);
            clog(&format!("signed in as {:?}", role));
            route.set(resolve_landing_route(next.role()));
            session.set(next);
        })
    };
    let sign_out = {
        let session = session.clone();
        let route = route.clone();
        Callback::from(move |_: MouseEvent| {
            session.set(Session::default());
            route.set(Route::Login);
        })
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: ()| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_: ()| show_settings.set(false))
    };
    let change_settings = {
        let settings = settings.clone();
        Callback::from(move |next: Settings| settings.set(next))
    };
    let clear_saved = Callback::from(move |_: ()| {
        BrowserLevelStore::default().clear_saved();
    });

    let content = match guard((*route).clone(), &session) {
        Route::Login => html! { <LoginView sign_in={sign_in} /> },
        Route::StudentLevel(id) => html! { <LevelView
            key={id.clone()}
            level_id={id.clone()}
            settings={(*settings).clone()}
            navigate={navigate.clone()}
            on_open_settings={open_settings.clone()}
        /> },
        Route::ProfessorEditor(id) => html! { <EditorView
            key={id.clone()}
            level_id={id.clone()}
            navigate={navigate.clone()}
        /> },
    };
    let top_bar = match &session.user {
        Some(user) => html! {
            <div style="display:flex; align-items:center; gap:12px; padding:8px 12px; border-bottom:1px solid #30363d;">
                <span style="font-weight:600;">{"🧩 Block Maze"}</span>
                <span style="flex:1;"></span>
                <span style="font-size:13px; opacity:0.8;">{ format!("{} ({:?})", user.username, user.role) }</span>
                <button onclick={{ let cb = open_settings.clone(); Callback::from(move |_: MouseEvent| cb.emit(())) }}>{"Settings"}</button>
                <button onclick={sign_out}>{"Sign out"}</button>
            </div>
        },
        None => html! {},
    };

    html! {
        <ContextProvider<RegistryContext> context={(*registry).clone()}>
            <div style="position:relative; min-height:100vh; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
                { top_bar }
                { content }
                <SettingsModal
                    show={*show_settings}
                    settings={(*settings).clone()}
                    on_change={change_settings}
                    on_close={close_settings}
                    on_clear_saved_levels={clear_saved}
                />
            </div>
        </ContextProvider<RegistryContext>>
    }
}
