/// Terminal front-end for the memory capture flow
pub mod app;
pub mod events;
pub mod screens;
pub mod theme;

use crate::controller::Controller;
use crate::Result;

/// Run the interactive front-end until the user quits
pub async fn run(controller: Controller) -> Result<()> {
    let app = app::App::new(controller);
    app.run().await
}
