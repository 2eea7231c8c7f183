#[tokio::main]
async fn main() {
    networking_backend::run().await;
}
