#[tokio::main]
async fn main() -> anyhow::Result<()> {
    meta_ads_dashboard::run().await
}
