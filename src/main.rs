#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    rsstore::run().await
}
