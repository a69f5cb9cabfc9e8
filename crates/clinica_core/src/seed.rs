//! Demonstration dataset used on first run and after a full data reset.
//!
//! Mirrors the original deployment's demo fixtures: three patients, three
//! appointments booked for the reference date, one SOAP record and two
//! payments. Documents start empty.

use chrono::NaiveDate;

use crate::audit;
use crate::model::{
    Address, Appointment, AppointmentStatus, AppointmentType, Assessment, CarePlan,
    InsurancePlan, MedicalRecord, Objective, Patient, Payment, PaymentMethod, PaymentStatus,
    Prescription, Sex, Subjective, VitalSigns,
};
use crate::store::ClinicSnapshot;

/// Builds the demo snapshot with appointments on `today`.
pub fn demo_snapshot(today: NaiveDate) -> ClinicSnapshot {
    let today_str = today.format("%Y-%m-%d").to_string();
    ClinicSnapshot {
        patients: demo_patients(),
        appointments: demo_appointments(&today_str),
        records: demo_records(),
        payments: demo_payments(&today_str),
        documents: Vec::new(),
    }
}

fn demo_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "1".to_string(),
            nome: "João Carlos Santos".to_string(),
            cpf: "123.456.789-00".to_string(),
            data_nascimento: "1985-03-15".to_string(),
            sexo: Sex::Male,
            telefone: "(11) 98765-4321".to_string(),
            email: Some("joao.santos@email.com".to_string()),
            endereco: Address {
                logradouro: "Rua das Flores".to_string(),
                numero: "123".to_string(),
                complemento: None,
                bairro: "Centro".to_string(),
                cidade: "São Paulo".to_string(),
                estado: "SP".to_string(),
                cep: "01234-567".to_string(),
            },
            convenio: None,
            alergias: Some(vec!["Dipirona".to_string()]),
            medicamentos_em_uso: Some(vec!["Losartana 50mg".to_string()]),
            historico_familiar: None,
            observacoes: None,
            consentimentos: None,
            created_at: "2024-01-15T10:00:00.000Z".to_string(),
            updated_at: "2024-01-15T10:00:00.000Z".to_string(),
        },
        Patient {
            id: "2".to_string(),
            nome: "Maria Fernanda Lima".to_string(),
            cpf: "987.654.321-00".to_string(),
            data_nascimento: "1990-07-22".to_string(),
            sexo: Sex::Female,
            telefone: "(11) 91234-5678".to_string(),
            email: Some("maria.lima@email.com".to_string()),
            endereco: Address {
                logradouro: "Av. Paulista".to_string(),
                numero: "1000".to_string(),
                complemento: Some("Apto 45".to_string()),
                bairro: "Bela Vista".to_string(),
                cidade: "São Paulo".to_string(),
                estado: "SP".to_string(),
                cep: "01310-100".to_string(),
            },
            convenio: Some(InsurancePlan {
                nome: "Unimed".to_string(),
                numero: "123456789".to_string(),
                validade: "2025-12-31".to_string(),
            }),
            alergias: None,
            medicamentos_em_uso: None,
            historico_familiar: None,
            observacoes: None,
            consentimentos: None,
            created_at: "2024-02-10T14:30:00.000Z".to_string(),
            updated_at: "2024-02-10T14:30:00.000Z".to_string(),
        },
        Patient {
            id: "3".to_string(),
            nome: "Pedro Henrique Oliveira".to_string(),
            cpf: "456.789.123-00".to_string(),
            data_nascimento: "1978-11-08".to_string(),
            sexo: Sex::Male,
            telefone: "(11) 99876-5432".to_string(),
            email: None,
            endereco: Address {
                logradouro: "Rua Augusta".to_string(),
                numero: "500".to_string(),
                complemento: None,
                bairro: "Consolação".to_string(),
                cidade: "São Paulo".to_string(),
                estado: "SP".to_string(),
                cep: "01305-000".to_string(),
            },
            convenio: None,
            alergias: Some(vec!["Penicilina".to_string(), "Ibuprofeno".to_string()]),
            medicamentos_em_uso: Some(vec![
                "Metformina 850mg".to_string(),
                "Atenolol 25mg".to_string(),
            ]),
            historico_familiar: Some("Pai diabético, mãe hipertensa".to_string()),
            observacoes: None,
            consentimentos: None,
            created_at: "2024-03-05T09:15:00.000Z".to_string(),
            updated_at: "2024-03-05T09:15:00.000Z".to_string(),
        },
    ]
}

fn demo_appointments(today: &str) -> Vec<Appointment> {
    vec![
        Appointment {
            id: "1".to_string(),
            patient_id: "1".to_string(),
            data: today.to_string(),
            hora_inicio: "09:00".to_string(),
            hora_fim: "09:30".to_string(),
            tipo: AppointmentType::Retorno,
            status: AppointmentStatus::Confirmada,
            motivo: Some("Acompanhamento de hipertensão".to_string()),
            observacoes: None,
            valor: Some(250.0),
            convenio: None,
            created_at: "2024-12-10T10:00:00.000Z".to_string(),
            updated_at: "2024-12-10T10:00:00.000Z".to_string(),
        },
        Appointment {
            id: "2".to_string(),
            patient_id: "2".to_string(),
            data: today.to_string(),
            hora_inicio: "10:00".to_string(),
            hora_fim: "10:30".to_string(),
            tipo: AppointmentType::PrimeiraConsulta,
            status: AppointmentStatus::Agendada,
            motivo: Some("Check-up geral".to_string()),
            observacoes: None,
            valor: None,
            convenio: Some(true),
            created_at: "2024-12-11T14:00:00.000Z".to_string(),
            updated_at: "2024-12-11T14:00:00.000Z".to_string(),
        },
        Appointment {
            id: "3".to_string(),
            patient_id: "3".to_string(),
            data: today.to_string(),
            hora_inicio: "11:00".to_string(),
            hora_fim: "11:30".to_string(),
            tipo: AppointmentType::Retorno,
            status: AppointmentStatus::Aguardando,
            motivo: Some("Revisão de exames".to_string()),
            observacoes: None,
            valor: Some(200.0),
            convenio: None,
            created_at: "2024-12-12T16:00:00.000Z".to_string(),
            updated_at: "2024-12-12T16:00:00.000Z".to_string(),
        },
    ]
}

fn demo_records() -> Vec<MedicalRecord> {
    vec![MedicalRecord {
        id: "1".to_string(),
        patient_id: "1".to_string(),
        appointment_id: Some("1".to_string()),
        data: "2024-11-15".to_string(),
        tipo_atendimento: Some("retorno".to_string()),
        medico_responsavel: Some("Dr. Lucas Duarte".to_string()),
        crm_medico: Some("000000/SP".to_string()),
        subjetivo: Subjective {
            queixa_principal: "Cefaleia frequente há 2 semanas".to_string(),
            historico_doenca_atual: "Paciente refere dor de cabeça frontal, pulsátil, de \
                 intensidade moderada, que piora no final do dia. Nega náuseas ou vômitos."
                .to_string(),
            duracao_sintomas: Some("2 semanas".to_string()),
            sintomas_associados: None,
            revisao_sistemas: Some("Nega alterações visuais, febre, rigidez de nuca.".to_string()),
        },
        objetivo: Objective {
            sinais_vitais: VitalSigns {
                pressao_arterial: Some("140/90".to_string()),
                frequencia_cardiaca: Some(78),
                temperatura: Some(36.5),
                peso: Some(82.0),
                altura: Some(175.0),
                imc: Some(26.8),
                ..VitalSigns::default()
            },
            exame_fisico: "BEG, corado, hidratado. ACV: RCR 2T BNF. AR: MVU sem RA. Abdome: \
                 flácido, indolor. Neurológico: sem déficits focais."
                .to_string(),
            exames_complementares: None,
        },
        avaliacao: Assessment {
            hipoteses_diagnosticas: vec![
                "Cefaleia tensional".to_string(),
                "Hipertensão arterial sistêmica".to_string(),
            ],
            diagnostico_principal: None,
            cid10: Some(vec!["G44.2".to_string(), "I10".to_string()]),
        },
        plano: CarePlan {
            conduta: "Orientado sobre manejo do estresse. Ajuste de medicação \
                 anti-hipertensiva."
                .to_string(),
            prescricoes: Some(vec![Prescription {
                id: "1".to_string(),
                medicamento: "Losartana".to_string(),
                concentracao: Some("50mg".to_string()),
                forma_farmaceutica: "Comprimido".to_string(),
                posologia: "1 comprimido pela manhã".to_string(),
                quantidade: "30 comprimidos".to_string(),
                duracao: Some("30 dias".to_string()),
                observacoes: None,
            }]),
            solicitacao_exames: Some(vec![
                "Hemograma completo".to_string(),
                "Glicemia de jejum".to_string(),
                "Perfil lipídico".to_string(),
            ]),
            retorno: Some("30 dias".to_string()),
            orientacoes: Some(
                "Dieta hipossódica, atividade física regular, controle de PA domiciliar."
                    .to_string(),
            ),
        },
        audit: audit::seeded_log(None, "2024-11-15T10:30:00.000Z"),
        created_at: "2024-11-15T10:30:00.000Z".to_string(),
        updated_at: "2024-11-15T10:30:00.000Z".to_string(),
    }]
}

fn demo_payments(today: &str) -> Vec<Payment> {
    vec![
        Payment {
            id: "1".to_string(),
            patient_id: "1".to_string(),
            appointment_id: Some("1".to_string()),
            valor: 250.0,
            descricao: "Consulta de retorno".to_string(),
            forma_pagamento: PaymentMethod::Pix,
            status: PaymentStatus::Pago,
            data_pagamento: Some("2024-11-15".to_string()),
            data_vencimento: None,
            numero_recibo: Some("REC-2024-001".to_string()),
            observacoes: None,
            created_at: "2024-11-15T11:00:00.000Z".to_string(),
            updated_at: "2024-11-15T11:00:00.000Z".to_string(),
        },
        Payment {
            id: "2".to_string(),
            patient_id: "3".to_string(),
            appointment_id: None,
            valor: 200.0,
            descricao: "Consulta".to_string(),
            forma_pagamento: PaymentMethod::CartaoCredito,
            status: PaymentStatus::Pendente,
            data_pagamento: None,
            data_vencimento: Some(today.to_string()),
            numero_recibo: None,
            observacoes: None,
            created_at: "2024-12-12T16:30:00.000Z".to_string(),
            updated_at: "2024-12-12T16:30:00.000Z".to_string(),
        },
    ]
}
