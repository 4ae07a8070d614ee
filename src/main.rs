fn main() -> anyhow::Result<()> {
    cadenza::app_core::Cadenza::new()?.run()?;
    Ok(())
}
