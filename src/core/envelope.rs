use crate::utils::error::{DemoError, Result};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

pub const SOAP11_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const SOAP12_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

pub const SOAP11_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Builds a SOAP 1.1 document/literal request whose body element is `element`
/// in `namespace`, with one child per `(name, value)` pair.
pub fn build_request(namespace: &str, element: &str, params: &[(&str, String)]) -> String {
    let mut body = String::new();
    for (name, value) in params {
        body.push_str(&format!("<{name}>{}</{name}>", escape(value.as_str())));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:soap="{env}">"#,
            r#"<soap:Body><{element} xmlns="{ns}">{body}</{element}></soap:Body>"#,
            r#"</soap:Envelope>"#
        ),
        env = SOAP11_ENVELOPE_NS,
        element = element,
        ns = escape(namespace),
        body = body,
    )
}

#[derive(Debug, Default)]
struct Fault {
    code: Option<String>,
    reason: Option<String>,
}

/// Extracts the text of the first child of `response_element`, or the fault the
/// service reported instead.
pub fn parse_response(xml: &str, response_element: &str) -> Result<String> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut fault: Option<Fault> = None;
    let mut response_depth: Option<usize> = None;
    let mut result: Option<String> = None;
    let mut capturing = false;

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let in_envelope_ns = is_envelope_ns(&ns);
        let is_empty = matches!(event, Event::Empty(_));
        match event {
            Event::Start(e) | Event::Empty(e) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

                if in_envelope_ns && local == "Fault" {
                    fault = Some(Fault::default());
                } else if response_depth.is_none() && local == response_element {
                    response_depth = Some(path.len());
                } else if result.is_none()
                    && !capturing
                    && response_depth.is_some_and(|depth| path.len() == depth + 1)
                {
                    if is_empty {
                        result = Some(String::new());
                    } else {
                        capturing = true;
                    }
                }

                if !is_empty {
                    path.push(local);
                }
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(quick_xml::Error::from)?.into_owned();
                record_text(text, capturing, &mut result, fault.as_mut(), &path);
            }
            Event::CData(t) => {
                let text = String::from_utf8_lossy(&t).into_owned();
                record_text(text, capturing, &mut result, fault.as_mut(), &path);
            }
            Event::End(_) => {
                path.pop();
                if capturing {
                    capturing = false;
                    result.get_or_insert_with(String::new);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(fault) = fault {
        return Err(DemoError::SoapFault {
            code: fault.code.unwrap_or_else(|| "unknown".to_string()),
            reason: fault.reason.unwrap_or_else(|| "no reason given".to_string()),
        });
    }

    result.ok_or_else(|| DemoError::ProtocolError {
        message: format!("SOAP response has no <{}> result", response_element),
    })
}

fn record_text(
    text: String,
    capturing: bool,
    result: &mut Option<String>,
    fault: Option<&mut Fault>,
    path: &[String],
) {
    if capturing {
        result.get_or_insert_with(String::new).push_str(&text);
    } else if let Some(fault) = fault {
        match path.last().map(String::as_str) {
            Some("faultcode") | Some("Value") if fault.code.is_none() => fault.code = Some(text),
            Some("faultstring") | Some("Text") if fault.reason.is_none() => {
                fault.reason = Some(text)
            }
            _ => {}
        }
    }
}

fn is_envelope_ns(ns: &ResolveResult) -> bool {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => {
            *uri == SOAP11_ENVELOPE_NS.as_bytes() || *uri == SOAP12_ENVELOPE_NS.as_bytes()
        }
        _ => false,
    }
}
