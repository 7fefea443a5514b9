//! Output dialects and their fixed program templates

use std::fmt;
use std::str::FromStr;

const C_HEADER: &str = "#include <stdio.h>\n#include <stdlib.h>\n\
#define w while(*p)\n#define g *p=getchar()\n#define o putchar(*p)\n\
#define f if(p-t>=s)t=realloc(t,s=p-t+1)\n\
int main(){char*t=malloc(1);size_t s=1;char*p=t;";

const C0_HEADER: &str = "#include <stdio.h>\n#include <stdlib.h>\n\
char*t;size_t s=1;char*p;\
void a(size_t n){p+=n;if(p-t>=s)t=realloc(t,s=p-t+1);}\
void b(size_t n){p-=n;}\
void c(int n){*p+=n;}\
void d(int n){*p-=n;}\
void e(){putchar(*p);}\
void f(){*p=getchar();}\
int main(){t=malloc(1);p=t;";

const C_FOOTER: &str = "free(t);exit(0);}";

/// Output dialect, selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// C using the `w`/`g`/`o`/`f` macros from the header
    #[default]
    C,
    /// Filtered Brainfuck
    Bf,
    /// C using named helper functions
    C0,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::C, Target::Bf, Target::C0];

    /// Name accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Target::C => "c",
            Target::Bf => "bf",
            Target::C0 => "c0",
        }
    }

    /// Text written before the translated body
    pub fn header(self) -> &'static str {
        match self {
            Target::C => C_HEADER,
            Target::C0 => C0_HEADER,
            Target::Bf => "",
        }
    }

    /// Text written after the translated body
    pub fn footer(self) -> &'static str {
        match self {
            Target::C | Target::C0 => C_FOOTER,
            Target::Bf => "",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown target language '{0}'")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|target| target.name() == s)
            .ok_or_else(|| UnknownTarget(s.to_string()))
    }
}
