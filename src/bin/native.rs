fn main() -> eframe::Result<()> {
    thought_web::native::run()
}
