//! Bracket-aware scanning of TypeScript source text.
//!
//! Not a parser: it only knows which bytes are code (as opposed to string,
//! template or comment contents) so that bracket matching and identifier
//! searches are not fooled by text inside literals. Template literals are
//! treated as opaque strings, including their `${}` holes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteKind {
  Code,
  Comment,
  /// Inside a string or template literal, quotes included.
  Literal,
}

/// Classification of every byte of a source text.
#[derive(Debug)]
pub struct Scanner<'a> {
  source: &'a str,
  kinds: Vec<ByteKind>,
}

fn is_ident_byte(b: u8) -> bool {
  b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

impl<'a> Scanner<'a> {
  pub fn new(source: &'a str) -> Self {
    let bytes = source.as_bytes();
    let mut kinds = vec![ByteKind::Code; bytes.len()];
    let mut i = 0;
    while i < bytes.len() {
      let start = i;
      let kind = match bytes[i] {
        b'/' if bytes.get(i + 1) == Some(&b'/') => {
          while i < bytes.len() && bytes[i] != b'\n' {
            i += 1;
          }
          ByteKind::Comment
        }
        b'/' if bytes.get(i + 1) == Some(&b'*') => {
          i += 2;
          while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
            i += 1;
          }
          i += 2;
          ByteKind::Comment
        }
        quote @ (b'\'' | b'"' | b'`') => {
          i += 1;
          while i < bytes.len() && bytes[i] != quote {
            if bytes[i] == b'\\' {
              i += 1;
            }
            i += 1;
          }
          i += 1;
          ByteKind::Literal
        }
        _ => {
          i += 1;
          continue;
        }
      };
      let end = i.min(bytes.len());
      kinds[start..end].fill(kind);
    }
    Self { source, kinds }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn is_code(&self, index: usize) -> bool {
    self.kinds.get(index) == Some(&ByteKind::Code)
  }

  fn is_blank(&self, index: usize) -> bool {
    match self.kinds.get(index) {
      Some(ByteKind::Comment) => true,
      Some(ByteKind::Code) => self.source.as_bytes()[index].is_ascii_whitespace(),
      _ => false,
    }
  }

  /// Next code byte at or after `from` that is not whitespace.
  pub fn skip_whitespace(&self, from: usize) -> Option<usize> {
    let bytes = self.source.as_bytes();
    (from..bytes.len()).find(|&i| self.is_code(i) && !bytes[i].is_ascii_whitespace())
  }

  /// Last code byte before `before` that is neither whitespace nor comment.
  pub fn last_non_whitespace(&self, before: usize) -> Option<usize> {
    let bytes = self.source.as_bytes();
    (0..before.min(bytes.len()))
      .rev()
      .find(|&i| self.is_code(i) && !bytes[i].is_ascii_whitespace())
  }

  /// First byte at or after `from` that is not whitespace or comment.
  /// String literals count as tokens.
  fn next_token(&self, from: usize, to: usize) -> Option<usize> {
    (from..to.min(self.source.len())).find(|&i| !self.is_blank(i))
  }

  /// End (exclusive) of the literal starting at `start`.
  fn literal_end(&self, start: usize) -> usize {
    (start..self.kinds.len())
      .find(|&i| self.kinds[i] != ByteKind::Literal)
      .unwrap_or(self.kinds.len())
  }

  /// Every code occurrence of the identifier `name`, whole-word only.
  pub fn find_identifier(&self, name: &str, from: usize, to: usize) -> Vec<usize> {
    let bytes = self.source.as_bytes();
    let to = to.min(bytes.len());
    self
      .source
      .get(from..to)
      .map(|window| {
        window
          .match_indices(name)
          .map(|(offset, _)| from + offset)
          .filter(|&start| {
            let end = start + name.len();
            self.is_code(start)
              && (start == 0 || !is_ident_byte(bytes[start - 1]))
              && (end >= bytes.len() || !is_ident_byte(bytes[end]))
          })
          .collect()
      })
      .unwrap_or_default()
  }

  /// Offset of the opening parenthesis of the first call to `name`.
  pub fn find_call(&self, name: &str) -> Option<usize> {
    self
      .find_identifier(name, 0, self.source.len())
      .into_iter()
      .find_map(|start| {
        let open = self.skip_whitespace(start + name.len())?;
        (self.source.as_bytes()[open] == b'(').then_some(open)
      })
  }

  /// Offset of the bracket closing the one at `open`.
  pub fn matching(&self, open: usize) -> Option<usize> {
    let bytes = self.source.as_bytes();
    let mut depth = 0usize;
    for i in open..bytes.len() {
      if !self.is_code(i) {
        continue;
      }
      match bytes[i] {
        b'(' | b'[' | b'{' => depth += 1,
        b')' | b']' | b'}' => {
          depth = depth.checked_sub(1)?;
          if depth == 0 {
            return Some(i);
          }
        }
        _ => {}
      }
    }
    None
  }

  /// Trimmed byte ranges of the comma-separated items between `open` and `close`.
  ///
  /// A trailing comma does not produce an empty item.
  pub fn top_level_items(&self, open: usize, close: usize) -> Vec<(usize, usize)> {
    let bytes = self.source.as_bytes();
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = open + 1;

    let push = |start: usize, end: usize, items: &mut Vec<(usize, usize)>| {
      let text = &self.source[start..end];
      let trimmed_start = start + (text.len() - text.trim_start().len());
      let trimmed_end = start + text.trim_end().len();
      if trimmed_start < trimmed_end {
        items.push((trimmed_start, trimmed_end));
      }
    };

    for i in open + 1..close {
      if !self.is_code(i) {
        continue;
      }
      match bytes[i] {
        b'(' | b'[' | b'{' => depth += 1,
        b')' | b']' | b'}' => depth = depth.saturating_sub(1),
        b',' if depth == 0 => {
          push(start, i, &mut items);
          start = i + 1;
        }
        _ => {}
      }
    }
    push(start, close, &mut items);
    items
  }

  /// Value offset of the `key:` property directly inside the object at `open`.
  ///
  /// The key may be bare or quoted; comments around it are skipped.
  pub fn find_property(&self, open: usize, key: &str) -> Option<usize> {
    let close = self.matching(open)?;
    let bytes = self.source.as_bytes();
    self.top_level_items(open, close).into_iter().find_map(|(start, end)| {
      let first = self.next_token(start, end)?;
      let after_key = if self.kinds[first] == ByteKind::Literal {
        let literal_end = self.literal_end(first);
        let quoted = self.source.get(first + 1..literal_end.checked_sub(1)?)?;
        (quoted == key).then_some(literal_end)?
      } else {
        let key_end = first + key.len();
        let matches = self.source.get(first..key_end) == Some(key)
          && (key_end >= bytes.len() || !is_ident_byte(bytes[key_end]));
        matches.then_some(key_end)?
      };
      let colon = self.next_token(after_key, end)?;
      if !(self.is_code(colon) && bytes[colon] == b':') {
        return None;
      }
      self.next_token(colon + 1, end)
    })
  }
}
