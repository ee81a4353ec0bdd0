use mysh::{Renderer, Session};

fn main() -> anyhow::Result<()> {
    let renderer = Renderer::stdout();
    renderer.banner("Welcome to MyShell! Type 'exit' to quit.");
    let mut session = Session::new(renderer)?;
    session.run()
}
