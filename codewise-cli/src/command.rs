use codewise_core::course::CourseDraft;

pub const HELP: &str = "\
/<term>          search titles (a bare / clears the search)
n, p             next / previous page
g <page>         go to page
d <id>           delete course
e <id>           edit course
s <title> | <description>
                 save the course being edited
x                cancel edit
c <title> | <description>
                 create course
r                reload
q                quit";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Search(String),
    NextPage,
    PreviousPage,
    GoTo(usize),
    Delete(String),
    Edit(String),
    Submit(CourseDraft),
    CancelEdit,
    Create(CourseDraft),
    Reload,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(term) = line.strip_prefix('/') {
            return Ok(Self::Search(term.to_string()));
        }
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        match (name, arg) {
            ("n", "") => Ok(Self::NextPage),
            ("p", "") => Ok(Self::PreviousPage),
            ("g", page) => page
                .parse::<usize>()
                .ok()
                .and_then(|page| page.checked_sub(1))
                .map(Self::GoTo)
                .ok_or_else(|| format!("not a page number: {page:?}")),
            ("d", id) if !id.is_empty() => Ok(Self::Delete(id.to_string())),
            ("e", id) if !id.is_empty() => Ok(Self::Edit(id.to_string())),
            ("s", draft) => parse_draft(draft).map(Self::Submit),
            ("x", "") => Ok(Self::CancelEdit),
            ("c", draft) => parse_draft(draft).map(Self::Create),
            ("r", "") => Ok(Self::Reload),
            ("h" | "?", "") => Ok(Self::Help),
            ("q", "") => Ok(Self::Quit),
            _ => Err(format!("unknown command: {line:?}")),
        }
    }
}

fn parse_draft(arg: &str) -> Result<CourseDraft, String> {
    let (title, description) = arg.split_once('|').unwrap_or((arg, ""));
    let title = title.trim();
    if title.is_empty() {
        return Err("a course needs a title".to_string());
    }
    Ok(CourseDraft::new(title, description.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_keeps_inner_spaces() {
        assert_eq!(
            Command::parse("/intro to"),
            Ok(Command::Search("intro to".to_string()))
        );
        assert_eq!(Command::parse("/"), Ok(Command::Search(String::new())));
    }

    #[test]
    fn pages_are_one_based() {
        assert_eq!(Command::parse("g 1"), Ok(Command::GoTo(0)));
        assert_eq!(Command::parse("g 12"), Ok(Command::GoTo(11)));
        assert!(Command::parse("g 0").is_err());
        assert!(Command::parse("g -1").is_err());
        assert!(Command::parse("g").is_err());
    }

    #[test]
    fn drafts() {
        assert_eq!(
            Command::parse("c Rust 101 | Ownership, borrowing"),
            Ok(Command::Create(CourseDraft::new(
                "Rust 101",
                "Ownership, borrowing"
            )))
        );
        assert_eq!(
            Command::parse("s Only a title"),
            Ok(Command::Submit(CourseDraft::new("Only a title", "")))
        );
        assert!(Command::parse("c | no title").is_err());
    }

    #[test]
    fn ids_are_required() {
        assert_eq!(
            Command::parse("d  abc "),
            Ok(Command::Delete("abc".to_string()))
        );
        assert!(Command::parse("d").is_err());
        assert!(Command::parse("e").is_err());
    }

    #[test]
    fn unknown_commands() {
        assert!(Command::parse("n 2").is_err());
        assert!(Command::parse("zap").is_err());
        assert_eq!(Command::parse(" q "), Ok(Command::Quit));
    }
}
