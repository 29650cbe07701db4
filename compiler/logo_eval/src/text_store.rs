//! Read-only store of library procedure source and help text.
//!
//! Library procedures are written in Logo. The session defines and buries
//! them at startup, so they behave like primitives: hidden from listings,
//! SAVE and ERALL, but redefinable.

pub trait ProcedureTextStore {
    /// Names of the library procedures to define at startup.
    fn library_names(&self) -> Vec<&str>;

    /// Source text of a library procedure.
    fn procedure_text(&self, name: &str) -> Option<&str>;

    /// Help text for a primitive or library procedure.
    fn help_text(&self, name: &str) -> Option<&str>;
}

const LIBRARY: &[(&str, &str)] = &[
    (
        "while",
        "to while :while.condition :while.body
tag \"loop
if not run :while.condition [stop]
run :while.body
goto \"loop
end",
    ),
    (
        "until",
        "to until :until.condition :until.body
tag \"loop
if run :until.condition [stop]
run :until.body
goto \"loop
end",
    ),
    (
        "reverse",
        "to reverse :reverse.thing [:reverse.result []]
if emptyp :reverse.thing [output :reverse.result]
output (reverse butfirst :reverse.thing fput first :reverse.thing :reverse.result)
end",
    ),
    (
        "iseq",
        "to iseq :iseq.from :iseq.to
if :iseq.from > :iseq.to [output []]
output fput :iseq.from iseq :iseq.from + 1 :iseq.to
end",
    ),
    ("ignore", "to ignore :ignore.value\nend"),
];

const HELP: &[(&str, &str)] = &[
    ("forward", "FORWARD dist\nFD dist\n\tmoves the turtle forward, in the direction that it's facing, by\n\tthe specified distance (measured in turtle steps)."),
    ("print", "PRINT thing\nPR thing\n(PRINT thing1 thing2 ...)\n\tcommand. Prints the input or inputs to the current write stream.\n\tAll the inputs are printed on a single line, separated by spaces,\n\tending with a newline. The outer brackets of lists are omitted."),
    ("catch", "CATCH tag instructionlist\n\tcommand or operation. Runs its second input. Terminates that\n\tevaluation if a THROW with the same tag is run, outputting the\n\tvalue given to THROW, if any."),
    ("throw", "THROW tag\n(THROW tag value)\n\tcommand. Must be used within the scope of a CATCH with an equal\n\ttag. Ends the running of the instruction list of the CATCH."),
    ("repeat", "REPEAT num instructionlist\n\tcommand. Runs the instructionlist repeatedly, num times."),
    ("while", "WHILE tfexpression instructionlist\n\tcommand. Repeatedly evaluates the instructionlist as long as the\n\tevaluated tfexpression remains TRUE."),
    ("reverse", "REVERSE list\n\toutputs a list whose members are the members of the input list,\n\tin reverse order."),
];

/// The built-in library.
#[derive(Default)]
pub struct BuiltinTexts;

impl ProcedureTextStore for BuiltinTexts {
    fn library_names(&self) -> Vec<&str> {
        LIBRARY.iter().map(|(name, _)| *name).collect()
    }

    fn procedure_text(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        LIBRARY
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, text)| *text)
    }

    fn help_text(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        HELP.iter().find(|(n, _)| *n == name).map(|(_, text)| *text)
    }
}
