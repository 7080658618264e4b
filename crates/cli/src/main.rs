fn main() -> Result<(), Box<dyn std::error::Error>> {
    ejbmanifest_cli::run()
}
