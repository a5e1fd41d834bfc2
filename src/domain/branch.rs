/// Represents the checked-out branch relative to the configured mainline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_mainline: bool,
}

impl BranchContext {
    /// Create a new branch context
    pub fn new(name: impl Into<String>, mainline: &str) -> Self {
        let name_str = name.into();
        let is_mainline = name_str == mainline;

        BranchContext {
            name: name_str,
            is_mainline,
        }
    }

    /// Check if deployment may run from this branch
    pub fn can_deploy(&self) -> bool {
        self.is_mainline
    }

    /// Commands that move this branch's work onto the mainline.
    ///
    /// Printed as advice only; none of them are ever executed.
    pub fn recovery_steps(&self, mainline: &str, remote: &str) -> Vec<String> {
        vec![
            "git stash".to_string(),
            format!("git checkout {}", mainline),
            format!("git pull {} {}", remote, mainline),
            format!("git merge {}", self.name),
            "git stash apply".to_string(),
            format!("git push {} {}", remote, mainline),
        ]
    }
}
