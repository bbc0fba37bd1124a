/// A possibly qualified table reference (`[catalog.][schema.]name`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRef {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    /// Splits a dotted table name, honouring bracket-quoted parts such as
    /// `[sales].[order.items]`.
    pub fn parse(qualified: &str) -> Self {
        let mut parts = split_qualified(qualified.trim());
        let name = parts.pop().unwrap_or_default();
        let schema = parts.pop();
        let catalog = parts.pop();
        TableRef {
            catalog,
            schema,
            name,
        }
    }

    pub fn parts(&self) -> Vec<&str> {
        self.catalog
            .iter()
            .chain(self.schema.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .collect()
    }
}

fn split_qualified(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;

    for ch in input.chars() {
        match ch {
            '[' if !in_brackets => {
                in_brackets = true;
                current.push(ch);
            }
            ']' if in_brackets => {
                in_brackets = false;
                current.push(ch);
            }
            '.' if !in_brackets => parts.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    parts.push(current);
    parts
}
