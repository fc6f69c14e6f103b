use crate::common::Name;

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

fn subscript(mut n: usize) -> String {
	let mut digits = Vec::new();
	loop {
		digits.push(SUBSCRIPTS[n % 10]);
		n /= 10;
		if n == 0 {
			break;
		}
	}
	digits.into_iter().rev().collect()
}

/// Strips a trailing run of subscript digits, so that freshening `x₁` tries `x₂` rather than `x₁₁`.
fn stem(name: &str) -> &str { name.trim_end_matches(|c| SUBSCRIPTS.contains(&c)) }

/// Picks a name not satisfying `is_used`, preferring `name` itself and then numbered variants.
pub fn freshen(name: &Name, is_used: impl Fn(&str) -> bool) -> Name {
	if !is_used(name) {
		return name.clone();
	}
	let stem = match stem(name) {
		"" => "x",
		stem => stem,
	};
	(1..)
		.map(|n| format!("{stem}{}", subscript(n)))
		.find(|candidate| !is_used(candidate))
		.map(Name::from)
		.unwrap_or_else(|| unreachable!())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::name;

	#[test]
	fn test_unused_name_is_kept() { assert_eq!(&*freshen(&name("x"), |_| false), "x"); }

	#[test]
	fn test_used_name_gets_subscript() {
		let used = ["x", "x₁"];
		assert_eq!(&*freshen(&name("x"), |n| used.contains(&n)), "x₂");
	}

	#[test]
	fn test_subscripted_name_is_restemmed() {
		let used = ["n₁", "n₂"];
		assert_eq!(&*freshen(&name("n₁"), |n| used.contains(&n)), "n₃");
	}

	#[test]
	fn test_multi_digit_subscript() { assert_eq!(subscript(12), "₁₂"); }
}
