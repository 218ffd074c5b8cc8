use clap::Args;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};

// Every subcommand reads an instance and writes something back.
// This struct standardizes their implementation.
#[derive(Args)]
pub struct IOArgs {
    /// The instance JSON file ("-" implies stdin)
    #[arg(value_parser = clap::value_parser!(PathOrStd))]
    input: PathOrStd,

    /// The output file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(PathOrStd))]
    output: PathOrStd,
}

impl IOArgs {
    pub fn read(&self) -> anyhow::Result<Box<dyn Read>> {
        match &self.input {
            PathOrStd::Path(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            PathOrStd::Std => Ok(Box::new(stdin().lock())),
        }
    }

    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            PathOrStd::Path(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            PathOrStd::Std => Ok(Box::new(stdout().lock())),
        }
    }

    /// The extension of the output file, used to infer an export format
    pub fn extension(&self) -> Option<&str> {
        match &self.output {
            PathOrStd::Path(path) => path.extension(),
            PathOrStd::Std => None,
        }
        .and_then(|ext| ext.to_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
enum PathOrStd {
    Path(PathBuf),
    Std,
}

impl FromStr for PathOrStd {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(s.parse()?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("-", PathOrStd::Std)]
    #[case("balance.json", PathOrStd::Path("balance.json".into()))]
    fn dash_means_standard_streams(#[case] arg: &str, #[case] expected: PathOrStd) {
        assert_eq!(arg.parse::<PathOrStd>().unwrap(), expected);
    }

    #[rstest]
    fn extension_comes_from_the_output() {
        let io = IOArgs {
            input: PathOrStd::Std,
            output: PathOrStd::Path("model.lp".into()),
        };
        assert_eq!(io.extension(), Some("lp"));

        let io = IOArgs {
            input: PathOrStd::Path("instance.json".into()),
            output: PathOrStd::Std,
        };
        assert_eq!(io.extension(), None);
    }
}
