mod components;
mod level;
mod model;
mod plugins;
mod program;
mod state;
mod store;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
