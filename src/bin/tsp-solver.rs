fn main() -> Result<(), Box<dyn std::error::Error>> {
    tsp::runner::run()
}
