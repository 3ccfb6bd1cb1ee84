use anyhow::Result;

fn main() -> Result<()> {
    route_cli::main_entry()
}
