mod util;

fn main() {
    println!("answer: {}", util::answer());
}
