//! Built-in portfolio content: the intro banner, the about text, skills,
//! projects and contact links.

use crate::history::HistoryLine;
use crate::history::LineClass;

const BANNER: &str = r#"
   $$$$$\                               $$$$$$$$\      ©2024 
   \__$$ |                              \____$$  |          
      $$ | $$$$$$\  $$$$$$$\  $$\   $$\     $$  / $$$$$$$$\ 
      $$ | \____$$\ $$  __$$\ $$ |  $$ |   $$  /  \____$$  |
$$\   $$ | $$$$$$$ |$$ |  $$ |$$ |  $$ |  $$  /     $$$$ _/ 
$$ |  $$ |$$  __$$ |$$ |  $$ |$$ |  $$ | $$  /     $$  _/   
\$$$$$$  |\$$$$$$$ |$$ |  $$ |\$$$$$$  |$$$$$$$$\ $$$$$$$$\ 
 \______/  \_______|\__|  \__| \______/ \________|\________|
                                                            
  Welcome to my website! Type 'help' to see all available commands.
  If you have any questions, feel free to contact me at:
"#;

/// Indent used in front of contact and profile link bullets.
const BULLET: &str = "   - ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub link: String,
}

impl Project {
    fn new(name: &str, description: &str, link: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            link: link.to_string(),
        }
    }
}

/// Everything the built-in commands print. [`Profile::default`] carries the
/// site's own content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub banner: String,
    pub about: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub email: String,
    pub linkedin_url: String,
    pub github_url: String,
    pub github_label: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            banner: BANNER.to_string(),
            about: vec![
                "My name is Janus, im from Denmark and i study Computer Science in school.".to_string(),
                "Its my main passion and interest and i've been doing it for as long as i can remember".to_string(),
                "I love to learn new things and i'm always looking for new challenges".to_string(),
                "I'm currently looking for an internship or job for when im done with school, so if you know of any, please let me know :)".to_string(),
            ],
            skills: [
                "TypeScript",
                "Node.js",
                "React",
                "HTML",
                "CSS",
                "Git",
                "C#",
                "Python",
                "Learning new things ;)",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            projects: vec![
                Project::new(
                    "Codebreaker",
                    "A simple game where you have to hack into other computers and steal their money. Made for a school project.",
                    "https://github.com/JanuZz/codebreaker",
                ),
                Project::new(
                    "Archery Scorecard",
                    "A simple scorecard for archery. Keep track of your and your competitors scores",
                    "https://januzz.github.io/bueskydning-scorecard/",
                ),
                Project::new(
                    "Grammar Analyzer",
                    "A grammar analyzer made for a school project, works in the same sort of way that a compiler does. Written in TypeScript",
                    "https://github.com/JanuZz/GrammarAnalyser",
                ),
            ],
            email: "janus.langkilde.pedersen@gmail.com".to_string(),
            linkedin_url: "https://www.linkedin.com/in/janus-pedersen-25ba49298/".to_string(),
            github_url: "https://github.com/JanuZz".to_string(),
            github_label: "januzz.github.io".to_string(),
        }
    }
}

impl Profile {
    /// Lines shown once at startup: the banner, then the e-mail and LinkedIn
    /// bullets and a spacer.
    pub fn intro_lines(&self) -> Vec<HistoryLine> {
        let mut lines: Vec<HistoryLine> = self
            .banner
            .split('\n')
            .map(|line| HistoryLine::styled(line, LineClass::Banner))
            .collect();
        lines.push(self.email_line(false));
        lines.push(self.linkedin_line());
        lines.push(HistoryLine::plain(" "));
        lines
    }

    /// `with_address` adds the address after the link, as `contact` does.
    pub fn email_line(&self, with_address: bool) -> HistoryLine {
        let trail = if with_address {
            format!(" - {}", self.email)
        } else {
            String::new()
        };
        HistoryLine::link(BULLET, "Email", format!("mailto:{}", self.email), trail)
    }

    pub fn linkedin_line(&self) -> HistoryLine {
        HistoryLine::link(BULLET, "LinkedIn", &self.linkedin_url, "")
    }

    pub fn github_line(&self) -> HistoryLine {
        HistoryLine::link(BULLET, &self.github_label, &self.github_url, "")
    }

    pub fn project_lines(&self) -> Vec<HistoryLine> {
        self.projects
            .iter()
            .map(|project| {
                HistoryLine::link(
                    "- ",
                    &project.name,
                    &project.link,
                    format!(" - {}", project.description),
                )
            })
            .collect()
    }
}
