#[tokio::main]
async fn main() -> anyhow::Result<()> {
    films_db::app::run().await
}
