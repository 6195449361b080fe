use std::fmt;

/// The remote calls this client knows how to make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ScanImage,
    ScanManual,
    Interactions,
    Chat,
    Health,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ScanImage => "/scan/image",
            Endpoint::ScanManual => "/scan/manual",
            Endpoint::Interactions => "/analyze-interactions-ai",
            Endpoint::Chat => "/chatbot/chat",
            Endpoint::Health => "/health",
        }
    }

    /// Name of the backing service as shown to the user
    pub fn service(&self) -> &'static str {
        match self {
            Endpoint::ScanImage => "OCR service",
            Endpoint::ScanManual => "processing service",
            Endpoint::Interactions => "interaction service",
            Endpoint::Chat => "chatbot service",
            Endpoint::Health => "analysis service",
        }
    }

    /// Message used when the server rejects a request without saying why
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::ScanImage => "OCR processing failed",
            Endpoint::ScanManual => "Manual entry processing failed",
            Endpoint::Interactions => "Interaction check failed",
            Endpoint::Chat => "Chatbot request failed",
            Endpoint::Health => "Health check failed",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
