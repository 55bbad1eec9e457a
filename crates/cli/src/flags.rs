use clap::ValueEnum;
use lambda_translator::MessageType;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum MessageTypeFlag {
    Assertion,
    Question,
    Command,
    Uncertain,
}

impl MessageTypeFlag {
    pub(crate) const fn as_domain(self) -> MessageType {
        match self {
            MessageTypeFlag::Assertion => MessageType::Assertion,
            MessageTypeFlag::Question => MessageType::Question,
            MessageTypeFlag::Command => MessageType::Command,
            MessageTypeFlag::Uncertain => MessageType::Uncertain,
        }
    }
}

#[derive(Copy, Clone, Default, ValueEnum)]
pub(crate) enum SchemaKind {
    #[default]
    Message,
    Error,
}
