#[cfg(test)]
mod common;
#[cfg(test)]
mod test_text_edit;
