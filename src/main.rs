fn main() {
  let recommend = std::env::args().skip(1).any(|arg| arg == "--recommend");

  if let Err(e) = workout_log_lib::run(recommend) {
    eprintln!("workout-log: {}", e);
    std::process::exit(1);
  }
}
