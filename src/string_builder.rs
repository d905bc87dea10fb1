//! 语句输出缓冲区。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// 写入 `s`；如果不是首次写入，会先写入一个空格。
    pub(crate) fn write_leading(&mut self, s: &str) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 写入标识符：`a.b` -> `"a"."b"`，`*` 保持原样，内部的 `"` 会被转义。
    pub(crate) fn write_ident(&mut self, ident: &str) {
        for (i, part) in ident.split('.').enumerate() {
            if i > 0 {
                self.buf.push('.');
            }
            if part == "*" {
                self.buf.push('*');
                continue;
            }
            self.buf.push('"');
            for c in part.chars() {
                if c == '"' {
                    self.buf.push('"');
                }
                self.buf.push(c);
            }
            self.buf.push('"');
        }
    }

    /// 写入 `"alias"."column"`。
    pub(crate) fn write_qualified(&mut self, alias: &str, column: &str) {
        self.write_ident(alias);
        self.buf.push('.');
        self.write_ident(column);
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::StringBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_ident_splits_dots() {
        let mut b = StringBuilder::new();
        b.write_ident("t.id");
        b.write_str(", ");
        b.write_ident("t.*");
        b.write_str(", ");
        b.write_ident("we\"ird");
        assert_eq!(b.into_string(), r#""t"."id", "t".*, "we""ird""#);
    }

    #[test]
    fn write_leading_inserts_space() {
        let mut b = StringBuilder::new();
        b.write_leading("SELECT");
        b.write_leading("*");
        assert_eq!(b.as_str(), "SELECT *");
    }
}
