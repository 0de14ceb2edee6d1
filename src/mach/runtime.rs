use super::{Address, Program, Subs, Var};
use crate::error;
use crate::lang::{Error, Literal, Operator, Token, Word};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// ## The console collaborator
///
/// The engine is I/O free; whoever drives it supplies the console. `print`
/// receives each output line exactly as composed, newline included. `input`
/// blocks until it can produce an integer; `None` means it could not (bad
/// text, closed stream) and aborts the run.
pub trait Console {
    fn print(&mut self, text: &str);
    fn input(&mut self, prompt: &str) -> Option<i64>;
}

/// A live `for` loop: where each pass restarts and where the variable stops.
struct LoopFrame {
    reset: Address,
    bound: i64,
}

/// Which terminator ended a dead-branch scan.
enum Branch {
    Else,
    Endif,
}

/// ## The execution engine
///
/// Walks the grammar directly over the token buffer, evaluating as it goes.
/// The program counter is the only record of where control is: loops jump
/// it backward and re-parse their body tokens on every iteration, dead
/// branches are skipped token by token, and subroutine calls push the
/// resume address on a frame stack before jumping to the recorded body.
pub struct Runtime {
    program: Program,
    pc: Address,
    vars: Var,
    subs: Subs,
    frames: Vec<Address>,
    halted: bool,
    interrupted: Arc<AtomicBool>,
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime {
            program,
            pc: 0,
            vars: Var::new(),
            subs: Subs::new(),
            frames: vec![],
            halted: false,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag for an interrupt handler. When set, the run aborts with
    /// `BREAK` at the next statement boundary.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Lexical diagnostics from loading; a program with any is not runnable.
    pub fn errors(&self) -> &[Error] {
        self.program.errors()
    }

    pub fn vars(&self) -> &Var {
        &self.vars
    }

    /// Execute the whole program: optional leading comments and blank
    /// lines, an optional `program NAME :` header, then statements until
    /// `end` or the end of the buffer.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        self.skip_separators();
        if let Token::Word(Word::Program) = self.token() {
            self.advance();
            self.ident()?;
            self.expect(&Token::Colon)?;
        }
        loop {
            self.skip_separators();
            if self.halted || *self.token() == Token::Eof {
                return Ok(());
            }
            self.statement(console)?;
        }
    }

    fn token(&self) -> &Token {
        self.program.token(self.pc)
    }

    fn advance(&mut self) {
        self.pc += 1;
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        if self.token() == token {
            self.advance();
            return Ok(());
        }
        Err(error!(SyntaxError;
            format!("EXPECTED {}, FOUND {}", token, self.token())))
    }

    fn expect_word(&mut self, word: Word) -> Result<()> {
        self.expect(&Token::Word(word))
    }

    fn ident(&mut self) -> Result<String> {
        match self.token() {
            Token::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            found => Err(error!(SyntaxError;
                format!("EXPECTED IDENTIFIER, FOUND {}", found))),
        }
    }

    fn skip_separators(&mut self) {
        loop {
            match self.token() {
                Token::Newline | Token::Comment => self.advance(),
                _ => return,
            }
        }
    }

    /// Flat dispatch on the unconsumed token at the program counter. Block
    /// terminators are reacted to by their enclosing construct before this
    /// is called; one arriving here is stray and fatal.
    fn statement(&mut self, console: &mut dyn Console) -> Result<()> {
        if self.interrupted.swap(false, Ordering::SeqCst) {
            return Err(error!(Break));
        }
        match self.token().clone() {
            Token::Ident(_) => self.assignment(),
            Token::Word(Word::Print) => self.print(console),
            Token::Word(Word::Input) => self.input(console),
            Token::Word(Word::If) => self.if_statement(console),
            Token::Word(Word::While) => self.while_statement(console),
            Token::Word(Word::For) => self.for_statement(console),
            Token::Word(Word::Sub) => self.declaration(),
            Token::Word(Word::Call) => self.call(),
            Token::Word(Word::Return) => self.subroutine_return(),
            Token::Word(Word::Endsub) => self.subroutine_end(),
            Token::Word(Word::End) => {
                self.advance();
                self.halted = true;
                Ok(())
            }
            Token::Newline | Token::Comment => {
                self.advance();
                Ok(())
            }
            found => Err(error!(SyntaxError; format!("UNEXPECTED {}", found))),
        }
    }

    /// `NAME ':=' conditional`. The name is consumed before the operator is
    /// checked, so a missing `:=` gets its own diagnostic.
    fn assignment(&mut self) -> Result<()> {
        let name = self.ident()?;
        self.expect_assign(&name)?;
        let value = self.conditional()?;
        self.vars.store(&name, value);
        Ok(())
    }

    fn expect_assign(&mut self, name: &str) -> Result<()> {
        match self.token() {
            Token::Operator(Operator::Assign) => {
                self.advance();
                Ok(())
            }
            _ => Err(error!(SyntaxError;
                format!("EXPECTED := IN ASSIGNMENT TO {}", name))),
        }
    }

    /// Comma-separated items, each a string literal or an expression. The
    /// list ends at the newline, which is left for the caller; the composed
    /// line always gets exactly one trailing newline.
    fn print(&mut self, console: &mut dyn Console) -> Result<()> {
        self.expect_word(Word::Print)?;
        let mut line = String::new();
        loop {
            if let Token::Literal(Literal::String(s)) = self.token() {
                line.push_str(s);
                self.advance();
            } else {
                line.push_str(&self.conditional()?.to_string());
            }
            match self.token() {
                Token::Newline | Token::Eof => break,
                _ => self.expect(&Token::Comma)?,
            }
        }
        line.push('\n');
        console.print(&line);
        Ok(())
    }

    fn input(&mut self, console: &mut dyn Console) -> Result<()> {
        self.expect_word(Word::Input)?;
        let name = self.ident()?;
        let prompt = format!("Enter a value for {}: ", name);
        match console.input(&prompt) {
            Some(value) => {
                self.vars.store(&name, value);
                Ok(())
            }
            None => Err(error!(InvalidInput; name)),
        }
    }

    /// `conditional → expression [relOp expression]`. Relational results
    /// are exactly 1 or 0; without a relational operator the arithmetic
    /// value passes through.
    fn conditional(&mut self) -> Result<i64> {
        let lhs = self.expression()?;
        let op = match self.token() {
            Token::Operator(op) if op.is_relational() => op.clone(),
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.expression()?;
        use Operator::*;
        let truth = match op {
            Less => lhs < rhs,
            LessEqual => lhs <= rhs,
            Greater => lhs > rhs,
            GreaterEqual => lhs >= rhs,
            Equal => lhs == rhs,
            NotEqual => lhs != rhs,
            _ => return Err(error!(InternalError; "NOT A RELATIONAL OPERATOR")),
        };
        Ok(truth as i64)
    }

    fn expression(&mut self) -> Result<i64> {
        let mut value = self.term()?;
        loop {
            match self.token() {
                Token::Operator(Operator::Plus) => {
                    self.advance();
                    value = value.wrapping_add(self.term()?);
                }
                Token::Operator(Operator::Minus) => {
                    self.advance();
                    value = value.wrapping_sub(self.term()?);
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<i64> {
        let mut value = self.unary()?;
        loop {
            match self.token() {
                Token::Operator(Operator::Multiply) => {
                    self.advance();
                    value = value.wrapping_mul(self.unary()?);
                }
                Token::Operator(Operator::Divide) => {
                    self.advance();
                    let rhs = self.unary()?;
                    if rhs == 0 {
                        return Err(error!(DivisionByZero));
                    }
                    value = value.wrapping_div(rhs);
                }
                Token::Operator(Operator::Modulus) => {
                    self.advance();
                    let rhs = self.unary()?;
                    if rhs == 0 {
                        return Err(error!(DivisionByZero));
                    }
                    value = value.wrapping_rem(rhs);
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<i64> {
        if let Token::Operator(Operator::Minus) = self.token() {
            self.advance();
            return Ok(self.factor()?.wrapping_neg());
        }
        self.factor()
    }

    fn factor(&mut self) -> Result<i64> {
        match self.token().clone() {
            Token::Literal(Literal::Integer(text)) => {
                self.advance();
                match text.parse::<i64>() {
                    Ok(value) => Ok(value),
                    Err(_) => {
                        Err(error!(InternalError; format!("BAD INTEGER LITERAL {}", text)))
                    }
                }
            }
            Token::Ident(name) => {
                self.advance();
                self.vars.fetch(&name)
            }
            Token::LParen => {
                self.advance();
                let value = self.expression()?;
                self.expect(&Token::RParen)?;
                Ok(value)
            }
            found => Err(error!(SyntaxError;
                format!("EXPECTED NUMBER, NAME, OR PARENTHESIZED EXPRESSION, FOUND {}", found))),
        }
    }

    /// A condition and its trailing colon. Truth is nonzero.
    fn condition(&mut self) -> Result<i64> {
        let value = self.conditional()?;
        match self.token() {
            Token::Colon => {
                self.advance();
                Ok(value)
            }
            _ => Err(error!(SyntaxError; "MISSING COLON AFTER CONDITION")),
        }
    }

    fn if_statement(&mut self, console: &mut dyn Console) -> Result<()> {
        self.expect_word(Word::If)?;
        if self.condition()? != 0 {
            loop {
                self.skip_separators();
                match self.token() {
                    Token::Word(Word::Else) => {
                        self.advance();
                        return self.skip_block(Word::If, Word::Endif);
                    }
                    Token::Word(Word::Endif) => {
                        self.advance();
                        return Ok(());
                    }
                    Token::Eof => return Err(error!(MissingTerminator; "MISSING ENDIF")),
                    _ => self.statement(console)?,
                }
                if self.halted {
                    return Ok(());
                }
            }
        }
        match self.skip_branch()? {
            Branch::Endif => Ok(()),
            Branch::Else => {
                self.expect(&Token::Colon)?;
                loop {
                    self.skip_separators();
                    match self.token() {
                        Token::Word(Word::Endif) => {
                            self.advance();
                            return Ok(());
                        }
                        Token::Eof => {
                            return Err(error!(MissingTerminator; "MISSING ENDIF"))
                        }
                        _ => self.statement(console)?,
                    }
                    if self.halted {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Scan a dead `if` branch for its `else` or `endif`, counting nested
    /// `if`/`endif` pairs. Consumes the terminator it stops on.
    fn skip_branch(&mut self) -> Result<Branch> {
        let mut depth = 0;
        loop {
            match self.token() {
                Token::Word(Word::If) => depth += 1,
                Token::Word(Word::Else) if depth == 0 => {
                    self.advance();
                    return Ok(Branch::Else);
                }
                Token::Word(Word::Endif) => {
                    if depth == 0 {
                        self.advance();
                        return Ok(Branch::Endif);
                    }
                    depth -= 1;
                }
                Token::Word(Word::End) | Token::Eof => {
                    return Err(error!(MissingTerminator; "MISSING ENDIF"));
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a dead token range, consuming through the `close` keyword and
    /// counting nested `open`/`close` pairs on the way.
    fn skip_block(&mut self, open: Word, close: Word) -> Result<()> {
        let mut depth = 0;
        loop {
            match self.token().clone() {
                Token::Word(w) if w == open => depth += 1,
                Token::Word(w) if w == close => {
                    if depth == 0 {
                        self.advance();
                        return Ok(());
                    }
                    depth -= 1;
                }
                Token::Word(Word::End) | Token::Eof => {
                    return Err(error!(MissingTerminator;
                        format!("MISSING {}", close.to_string().to_ascii_uppercase())));
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// The reset point sits on the `while` keyword itself, so every pass
    /// re-parses the condition and the body from their tokens.
    fn while_statement(&mut self, console: &mut dyn Console) -> Result<()> {
        let reset = self.pc;
        loop {
            self.expect_word(Word::While)?;
            if self.condition()? == 0 {
                return self.skip_block(Word::While, Word::Endwhile);
            }
            loop {
                self.skip_separators();
                match self.token() {
                    Token::Word(Word::Endwhile) => break,
                    Token::Word(Word::End) | Token::Eof => {
                        return Err(error!(MissingTerminator; "MISSING ENDWHILE"));
                    }
                    _ => self.statement(console)?,
                }
                if self.halted {
                    return Ok(());
                }
            }
            self.pc = reset;
        }
    }

    /// `for NAME ':=' expression to expression ':'` with the bound held in
    /// an explicit loop frame. Bound checking interleaves with statement
    /// execution: a loop variable pushed past the bound mid-body ends the
    /// loop at the next statement boundary. After a completed loop the
    /// variable is one past the bound.
    fn for_statement(&mut self, console: &mut dyn Console) -> Result<()> {
        self.expect_word(Word::For)?;
        let name = self.ident()?;
        self.expect_assign(&name)?;
        let start = self.expression()?;
        self.vars.store(&name, start);
        match self.token().clone() {
            Token::Ident(to) if to.eq_ignore_ascii_case("to") => self.advance(),
            found => return Err(error!(SyntaxError; format!("EXPECTED TO, FOUND {}", found))),
        }
        let bound = self.expression()?;
        self.expect(&Token::Colon)?;
        self.skip_separators();
        let frame = LoopFrame {
            reset: self.pc,
            bound,
        };
        loop {
            if self.vars.fetch(&name)? > frame.bound {
                return self.skip_block(Word::For, Word::Endfor);
            }
            match self.token() {
                Token::Word(Word::Endfor) => {
                    let next = self.vars.fetch(&name)?.wrapping_add(1);
                    self.vars.store(&name, next);
                    if next > frame.bound {
                        self.advance();
                        return Ok(());
                    }
                    self.pc = frame.reset;
                }
                Token::Word(Word::End) | Token::Eof => {
                    return Err(error!(MissingTerminator; "MISSING ENDFOR"));
                }
                _ => {
                    self.statement(console)?;
                    self.skip_separators();
                }
            }
            if self.halted {
                return Ok(());
            }
        }
    }

    /// `sub NAME ':' NEWLINE` records where the body starts, then hops over
    /// it without executing. Registration happens whenever control passes
    /// the declaration, so a `call` textually before it fails the lookup.
    fn declaration(&mut self) -> Result<()> {
        self.expect_word(Word::Sub)?;
        let name = self.ident()?;
        self.expect(&Token::Colon)?;
        self.expect(&Token::Newline)?;
        self.subs.record(&name, self.pc);
        self.skip_block(Word::Sub, Word::Endsub)
    }

    /// `call NAME` pushes the resume address (just past the name token) and
    /// jumps to the recorded body.
    fn call(&mut self) -> Result<()> {
        self.expect_word(Word::Call)?;
        let name = self.ident()?;
        let body = self.subs.fetch(&name)?;
        self.frames.push(self.pc);
        self.pc = body;
        Ok(())
    }

    /// `return` pops the live frame and resumes past the call site. Outside
    /// any call it is an empty statement.
    fn subroutine_return(&mut self) -> Result<()> {
        self.expect_word(Word::Return)?;
        if let Some(resume) = self.frames.pop() {
            self.pc = resume;
        }
        Ok(())
    }

    /// `endsub` reached while a frame is live means the body ran off its
    /// end without `return`; treat it as one.
    fn subroutine_end(&mut self) -> Result<()> {
        match self.frames.pop() {
            Some(resume) => {
                self.pc = resume;
                Ok(())
            }
            None => Err(error!(SyntaxError; "UNEXPECTED endsub")),
        }
    }
}
