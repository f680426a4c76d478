#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    mietvertrag_server::run().await
}
