use std::rc::Rc;

pub type Name = Rc<str>;

/// A byte range into the program source: start inclusive, end exclusive.
pub type Range = (usize, usize);

#[derive(Clone, Debug)]
pub struct Binder<T> {
	pub parameter: Name,
	pub body: T,
}

impl<T> Binder<T> {
	pub fn new(parameter: Name, body: T) -> Self { Self { parameter, body } }
}

pub fn bind<T>(parameter: Name, body: impl Into<T>) -> Binder<T> { Binder::new(parameter, body.into()) }

/// Builds a name from a string literal.
pub fn name(string: &str) -> Name { Rc::from(string) }
