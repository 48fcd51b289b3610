use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    portal::cli::run().await
}
