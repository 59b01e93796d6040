#[cfg(test)]
mod test_expansion;
#[cfg(test)]
mod test_insert;
