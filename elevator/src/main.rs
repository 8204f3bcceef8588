fn main() -> Result<(), Box<dyn std::error::Error>> {
    elevator::modules::run()
}
