use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let mut app = croft::default();
    app.request_model("assets/dragon.obj");
    app.run();

    Ok(())
}
