fn main() {
    alpha::term::main()
}
