//! Credential validation CLI
//!
//! Standalone diagnostic for the Google service-account configuration.
//! Reads GOOGLE_CREDENTIALS (a path to a key file or the JSON inline),
//! validates the document, and — when DRIVE_ENABLED is set — checks that the
//! folder-identifier variables are present too.
//!
//! Usage:
//!   check-credentials          - Validate and print the report
//!
//! Exit code 0 only on a fully valid configuration.

use clap::Parser;
use granobot::core::credentials::{self, CredentialSource};

#[derive(Parser)]
#[command(name = "check-credentials")]
#[command(about = "Validate the Google service-account credential configuration")]
#[command(version)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let report = credentials::validate_environment();

    println!("🔑 Verificación de credenciales");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match &report.credentials {
        Err(reason) => {
            println!("❌ {}", reason);
            println!("   Define GOOGLE_CREDENTIALS con la ruta del archivo JSON de la");
            println!("   cuenta de servicio, o con el documento JSON completo.");
        }
        Ok(cred) => {
            match &cred.source {
                CredentialSource::File(path) => println!("📄 Origen: archivo {}", path),
                CredentialSource::Inline => println!("📄 Origen: JSON en la variable de entorno"),
            }

            if let Some(reason) = &cred.parse_error {
                println!("❌ JSON inválido: {}", reason);
                println!("   Vuelve a descargar la clave desde la consola de Google Cloud.");
            } else {
                println!("✅ JSON válido");

                if cred.missing_fields.is_empty() {
                    println!("✅ Todos los campos requeridos están presentes");
                } else {
                    println!("❌ Campos faltantes o vacíos: {}", cred.missing_fields.join(", "));
                    println!("   La clave parece incompleta; genera una nueva clave de cuenta de servicio.");
                }

                if cred.pem_marker_present {
                    println!("✅ private_key contiene la clave PEM esperada");
                } else {
                    println!("❌ private_key no contiene \"{}\"", credentials::PEM_MARKER);
                    println!("   Revisa que los saltos de línea (\\n) no se hayan perdido al copiar la clave.");
                }

                if !cred.account_type_ok {
                    println!("⚠️ El campo type no es \"service_account\" (se continúa de todos modos)");
                }
            }
        }
    }

    if report.drive_enabled {
        if report.missing_env.is_empty() {
            println!("✅ Variables de la integración con Drive presentes");
        } else {
            for var in &report.missing_env {
                println!("❌ Falta la variable {}", var);
            }
            println!("   Son obligatorias mientras DRIVE_ENABLED esté activo.");
        }
    } else {
        println!("ℹ️ DRIVE_ENABLED desactivado; no se exigen las variables de carpetas");
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if report.fully_valid() {
        println!("✅ Configuración completa y válida");
    } else {
        println!("❌ Configuración incompleta — corrige los puntos marcados arriba");
        std::process::exit(1);
    }
}
