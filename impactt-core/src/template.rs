use crate::errors::RenderError;
use crate::params::Params;

/// Input-file template with `{name}` placeholders.
///
/// The file the simulator consumes is line-oriented numeric text, so braces
/// only ever mean placeholders here; a literal brace can be escaped as `{{`
/// or `}}`. Rendering is pure: identical template and parameters produce
/// byte-identical output.
#[derive(Clone, Debug)]
pub struct InputTemplate {
    text: String,
}

impl InputTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Result<Vec<String>, RenderError> {
        let mut names = Vec::new();
        self.scan(|name, _| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
            Ok(())
        })?;
        Ok(names)
    }

    /// Substitute every placeholder from `params`.
    pub fn render(&self, params: &Params) -> Result<String, RenderError> {
        self.scan(|name, out| {
            let value = params
                .get(name)
                .ok_or_else(|| RenderError::MissingParameter(name.to_string()))?;
            out.push_str(&value.to_string());
            Ok(())
        })
    }

    // Walks the template once, handing each placeholder name plus the output
    // buffer to `on_placeholder`. Literal text is copied through untouched.
    fn scan<F>(&self, mut on_placeholder: F) -> Result<String, RenderError>
    where
        F: FnMut(&str, &mut String) -> Result<(), RenderError>,
    {
        let mut out = String::with_capacity(self.text.len());
        let mut chars = self.text.char_indices().peekable();
        while let Some((at, c)) = chars.next() {
            match c {
                '{' => {
                    if matches!(chars.peek(), Some((_, '{'))) {
                        chars.next();
                        out.push('{');
                        continue;
                    }
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c2) in chars.by_ref() {
                        if c2 == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c2);
                    }
                    if !closed {
                        return Err(RenderError::UnterminatedPlaceholder(at));
                    }
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(RenderError::EmptyPlaceholder(at));
                    }
                    on_placeholder(name, &mut out)?;
                }
                '}' => {
                    if matches!(chars.peek(), Some((_, '}'))) {
                        chars.next();
                        out.push('}');
                    } else {
                        return Err(RenderError::UnmatchedBrace(at));
                    }
                }
                _ => out.push(c),
            }
        }
        Ok(out)
    }
}
