fn main() -> Result<(), Box<dyn std::error::Error>> {
    patrimonio_cli::run()
}
