fn main() -> anyhow::Result<()> {
    ltmsum::run()
}
