use anyhow::Result;

fn main() -> Result<()> {
    lambda_cli::main_entry()
}
